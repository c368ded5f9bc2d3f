//! Multi-factor reliability estimation
//!
//! Derives a four-term reliability estimate from a finished
//! [`ConsensusResult`]. Pure computation, no I/O: the same result always
//! yields the same metrics.
//!
//! The four terms and their fixed weights:
//!
//! | term                  | weight | measures                                  |
//! |-----------------------|--------|-------------------------------------------|
//! | consensus_quality     | 0.4    | how cleanly the method resolved the panel  |
//! | evaluator_diversity   | 0.3    | spread of opinion across the panel         |
//! | processing_efficiency | 0.2    | how few rounds / how cheap the method was  |
//! | final_agreement       | 0.1    | dispersion of the final contributing list  |

use crate::consensus::{ConsensusMethod, ConsensusResult};
use crate::scale::{MAX_STD_DEV, SCALE_RANGE};
use serde::{Deserialize, Serialize};

const QUALITY_WEIGHT: f64 = 0.4;
const DIVERSITY_WEIGHT: f64 = 0.3;
const EFFICIENCY_WEIGHT: f64 = 0.2;
const AGREEMENT_WEIGHT: f64 = 0.1;

/// Maximum boost the spread-improvement adjustment can add to quality.
const MAX_IMPROVEMENT_BOOST: f64 = 0.2;

/// Reliability estimate for one item's consensus, all terms in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityMetrics {
    pub overall: f64,
    pub consensus_quality: f64,
    pub evaluator_diversity: f64,
    pub processing_efficiency: f64,
    pub final_agreement: f64,
}

/// Calculator for the four-factor reliability model
#[derive(Debug, Clone, Copy, Default)]
pub struct ReliabilityCalculator;

impl ReliabilityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute reliability metrics for a consensus result.
    pub fn reliability(&self, result: &ConsensusResult) -> ReliabilityMetrics {
        let consensus_quality = Self::consensus_quality(result);
        let evaluator_diversity = Self::evaluator_diversity(result);
        let processing_efficiency = Self::processing_efficiency(result);
        let final_agreement = Self::final_agreement(&result.contributing_scores);

        let overall = QUALITY_WEIGHT * consensus_quality
            + DIVERSITY_WEIGHT * evaluator_diversity
            + EFFICIENCY_WEIGHT * processing_efficiency
            + AGREEMENT_WEIGHT * final_agreement;

        ReliabilityMetrics {
            overall,
            consensus_quality,
            evaluator_diversity,
            processing_efficiency,
            final_agreement,
        }
    }

    /// Base score keyed by method, boosted by how much the spread shrank
    /// relative to the very first round.
    fn consensus_quality(result: &ConsensusResult) -> f64 {
        let base = match result.method {
            ConsensusMethod::Perfect => 1.0,
            ConsensusMethod::Minor => 0.8,
            ConsensusMethod::ConsolidatedRecurse => 0.5,
            ConsensusMethod::Forced => 0.4,
        };

        let initial_spread = result.initial_spread();
        let boost = if initial_spread > 0.0 {
            let improvement = (initial_spread - result.final_spread()) / initial_spread;
            (improvement * MAX_IMPROVEMENT_BOOST).min(MAX_IMPROVEMENT_BOOST)
        } else {
            0.0
        };

        (base + boost).min(1.0)
    }

    /// Blend of distinct-value fractions in the first round and the final
    /// list, with a penalty that grows with extra rounds.
    fn evaluator_diversity(result: &ConsensusResult) -> f64 {
        let initial: Vec<f64> = result.initial_scores.iter().map(|s| s.as_f64()).collect();
        let initial_diversity = distinct_count(&initial) as f64 / initial.len() as f64;

        let final_scores = &result.contributing_scores;
        let final_diversity = distinct_count(final_scores) as f64 / final_scores.len() as f64;

        let round_factor = (1.0 - (result.rounds_used.saturating_sub(1)) as f64 * 0.2).max(0.0);

        0.4 * initial_diversity + 0.4 * final_diversity + 0.2 * round_factor
    }

    /// Average of a round-count term and a method-cost term.
    fn processing_efficiency(result: &ConsensusResult) -> f64 {
        let round_term = match result.rounds_used {
            1 => 1.0,
            2 => 0.8,
            rounds => (1.0 - (rounds - 2) as f64 * 0.2).max(0.4),
        };

        let method_term = match result.method {
            ConsensusMethod::Perfect => 1.0,
            ConsensusMethod::Minor => 0.9,
            ConsensusMethod::ConsolidatedRecurse => 0.6,
            ConsensusMethod::Forced => 0.5,
        };

        (round_term + method_term) / 2.0
    }

    /// Blend of dispersion, mode ratio and range of the final list, each
    /// rescaled against the scale's maximum.
    fn final_agreement(scores: &[f64]) -> f64 {
        if scores.len() < 2 {
            return 1.0;
        }

        let dispersion_term = (1.0 - sample_std_dev(scores) / MAX_STD_DEV).max(0.0);
        let mode_term = mode_count(scores) as f64 / scores.len() as f64;
        let range = crate::consensus::result::spread(scores);
        let range_term = (1.0 - range / SCALE_RANGE).max(0.0);

        0.4 * dispersion_term + 0.4 * mode_term + 0.2 * range_term
    }
}

/// Number of distinct values in the list (exact comparison, matching the
/// exact arithmetic the consensus engine performs).
fn distinct_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Size of the largest group of equal values.
fn mode_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best = 0;
    let mut run = 0;
    let mut previous = f64::NAN;
    for &value in &sorted {
        if value == previous {
            run += 1;
        } else {
            run = 1;
            previous = value;
        }
        best = best.max(run);
    }
    best
}

/// Sample standard deviation (n − 1 denominator).
fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
