//! Consensus result types
//!
//! This module defines the outcome record of one item's consensus
//! resolution, consumed by the reliability calculator and the dimension
//! expander.

use crate::item::ItemId;
use crate::scale::RawScore;
use serde::{Deserialize, Serialize};

/// How the consensus was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusMethod {
    /// All scores identical on the first look at a round.
    Perfect,
    /// Spread ≤ 2 in the first round; consensus is the plain mean.
    Minor,
    /// Spread ≤ 2 only after one or more consolidation rounds.
    ConsolidatedRecurse,
    /// Evaluator ceiling reached; the most-outlying score was dropped.
    Forced,
}

impl ConsensusMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusMethod::Perfect => "perfect",
            ConsensusMethod::Minor => "minor",
            ConsensusMethod::ConsolidatedRecurse => "consolidated-recurse",
            ConsensusMethod::Forced => "forced",
        }
    }
}

impl std::fmt::Display for ConsensusMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved consensus for one item
///
/// `contributing_scores` is the final round's current list; it may include
/// a consolidated (possibly fractional) representative of an earlier round,
/// and for a forced consensus it excludes the dropped outlier.
/// `initial_scores` is the very first round's raw panel, kept so the
/// reliability calculator can measure how much the spread improved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub item: ItemId,
    pub consensus_score: f64,
    pub contributing_scores: Vec<f64>,
    pub initial_scores: Vec<RawScore>,
    pub evaluator_count: usize,
    pub method: ConsensusMethod,
    pub rounds_used: usize,
}

impl ConsensusResult {
    /// Spread (max − min) of the contributing scores.
    pub fn final_spread(&self) -> f64 {
        spread(&self.contributing_scores)
    }

    /// Spread of the very first round's panel.
    pub fn initial_spread(&self) -> f64 {
        let values: Vec<f64> = self.initial_scores.iter().map(RawScore::as_f64).collect();
        spread(&values)
    }

    /// Whether every contributing score is the same value.
    pub fn is_unanimous(&self) -> bool {
        self.final_spread() == 0.0
    }
}

/// max − min over a non-empty score list (0.0 when empty).
pub(crate) fn spread(values: &[f64]) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if values.is_empty() { 0.0 } else { max - min }
}
