//! Domain layer for trait-panel
//!
//! This crate contains the scoring core of the assessment framework: pure
//! business logic with no I/O, no async, and no infrastructure
//! dependencies.
//!
//! # Pipeline
//!
//! ```text
//! raw judgments ─→ ConsensusEngine ─→ ConsensusResult
//!                                        │
//!                        ┌───────────────┼────────────────┐
//!                        ▼               ▼                │
//!               ReliabilityCalculator  DimensionExpander  │
//!                        │               │                │
//!                        ▼               ▼                ▼
//!               ReliabilityMetrics   DimensionVector  (per item)
//!                                        │
//!                             all items of one respondent
//!                                        ▼
//!                               ProfileAggregator
//!                                        ▼
//!                             TraitProfile + TypologyCode
//! ```
//!
//! The only suspension point in the whole pipeline, asking the evaluator
//! panel for more judgments, is pushed out to the application
//! layer through the [`consensus::ConsensusStep`] state machine; everything
//! in this crate is synchronous, deterministic computation.

pub mod consensus;
pub mod core;
pub mod dimension;
pub mod expand;
pub mod item;
pub mod judgment;
pub mod profile;
pub mod quality;
pub mod reliability;
pub mod scale;

// Re-export commonly used types
pub use consensus::{
    ConsensusEngine, ConsensusMethod, ConsensusResult, ConsensusStep, PendingConsensus,
    DEFAULT_MAX_EVALUATORS, INITIAL_PANEL_SIZE, SCORES_PER_EXPANSION,
};
pub use crate::core::error::ScoringError;
pub use dimension::{DimensionVector, TraitDimension};
pub use expand::{DimensionExpander, Expansion, FillMode};
pub use item::{Item, ItemId};
pub use judgment::{EvaluatorId, Judgment};
pub use profile::{Aggregation, ProfileAggregator, TraitProfile, TypologyCode};
pub use quality::DataQualityWarning;
pub use reliability::{ReliabilityCalculator, ReliabilityMetrics};
pub use scale::RawScore;
