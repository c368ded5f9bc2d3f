//! Scoring execution parameters
//!
//! Tunables the use cases need at run time. Defaults match the production
//! assessment setup: a panel of up to 7 evaluators and neutral-fill
//! expansion.

use panel_domain::{FillMode, DEFAULT_MAX_EVALUATORS};
use serde::{Deserialize, Serialize};

/// Default cap on items resolved concurrently per respondent.
pub const DEFAULT_MAX_CONCURRENT_ITEMS: usize = 8;

/// Runtime parameters for respondent scoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Ceiling on total evaluators consulted per item.
    pub max_evaluators: usize,
    /// How consensus scores expand onto the five dimensions.
    pub fill_mode: FillMode,
    /// Cap on items resolved concurrently for one respondent. The
    /// Evaluator adapter still owns provider-level rate limits; this only
    /// bounds task fan-out.
    pub max_concurrent_items: usize,
}

impl ScoringParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_evaluators(mut self, max_evaluators: usize) -> Self {
        self.max_evaluators = max_evaluators;
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn with_max_concurrent_items(mut self, max_concurrent_items: usize) -> Self {
        self.max_concurrent_items = max_concurrent_items;
        self
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            max_evaluators: DEFAULT_MAX_EVALUATORS,
            fill_mode: FillMode::NeutralFill,
            max_concurrent_items: DEFAULT_MAX_CONCURRENT_ITEMS,
        }
    }
}
