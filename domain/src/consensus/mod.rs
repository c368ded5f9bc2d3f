//! Adaptive consensus resolution
//!
//! Turns a panel of noisy ordinal judgments about one item into a single
//! consensus score.
//!
//! # Resolution rules
//!
//! Per round, over the current score list:
//!
//! - spread 0 → **perfect**: the common value wins.
//! - spread ≤ 2 → the mean wins (**minor** in round one,
//!   **consolidated-recurse** after the panel had to grow).
//! - spread 4 (both extremes present) → the round is consolidated into one
//!   representative value (median if a value repeats, else mean) and two
//!   more evaluators are requested, up to the ceiling; at the ceiling the
//!   most-outlying score is dropped and the consensus is **forced**.
//!
//! The panel grows 3 → 5 → 7 evaluators at most.

pub mod engine;
pub mod result;

pub use engine::{
    ConsensusEngine, ConsensusStep, PendingConsensus, DEFAULT_MAX_EVALUATORS, INITIAL_PANEL_SIZE,
    SCORES_PER_EXPANSION,
};
pub use result::{ConsensusMethod, ConsensusResult};
