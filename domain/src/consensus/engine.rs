//! Adaptive consensus engine
//!
//! Resolves a panel of evaluator scores for one item into a single
//! consensus score, adaptively widening the panel when the judges disagree
//! badly.
//!
//! Resolution is an explicit state machine: [`ConsensusEngine::begin`]
//! returns either a resolved result or a [`PendingConsensus`] demanding
//! more scores. The only suspension point, asking the evaluator panel for
//! more judgments, therefore lives entirely outside this module, which
//! keeps the algorithm pure and makes cancellation at round boundaries
//! trivially safe.
//!
//! # Example
//!
//! ```
//! use panel_domain::consensus::{ConsensusEngine, ConsensusMethod, ConsensusStep};
//! use panel_domain::scale::RawScore;
//!
//! let engine = ConsensusEngine::new();
//! let scores = vec![RawScore::MID, RawScore::MID, RawScore::HIGH];
//! match engine.begin("q01".into(), &scores).unwrap() {
//!     ConsensusStep::Resolved(result) => {
//!         assert_eq!(result.method, ConsensusMethod::Minor);
//!     }
//!     ConsensusStep::NeedMore(_) => unreachable!("spread 2 settles in round one"),
//! }
//! ```

use super::result::{spread, ConsensusMethod, ConsensusResult};
use crate::core::error::ScoringError;
use crate::item::ItemId;
use crate::scale::RawScore;

/// Size of the initial evaluator panel.
pub const INITIAL_PANEL_SIZE: usize = 3;
/// Scores requested per consolidation round.
pub const SCORES_PER_EXPANSION: usize = 2;
/// Default ceiling on total evaluators per item.
pub const DEFAULT_MAX_EVALUATORS: usize = 7;

/// Adaptive consensus engine for one measurement scale
#[derive(Debug, Clone)]
pub struct ConsensusEngine {
    max_evaluators: usize,
}

impl ConsensusEngine {
    /// Engine with the default evaluator ceiling of 7.
    pub fn new() -> Self {
        Self {
            max_evaluators: DEFAULT_MAX_EVALUATORS,
        }
    }

    /// Engine with a custom evaluator ceiling.
    pub fn with_max_evaluators(max_evaluators: usize) -> Self {
        Self { max_evaluators }
    }

    pub fn max_evaluators(&self) -> usize {
        self.max_evaluators
    }

    /// Start resolution from exactly three initial scores.
    ///
    /// Returns [`ConsensusStep::NeedMore`] when the panel must grow; the
    /// caller obtains the requested judgments and feeds them to
    /// [`PendingConsensus::advance`].
    pub fn begin(
        &self,
        item: ItemId,
        initial_scores: &[RawScore],
    ) -> Result<ConsensusStep, ScoringError> {
        if initial_scores.len() != INITIAL_PANEL_SIZE {
            return Err(ScoringError::WrongInitialCount {
                expected: INITIAL_PANEL_SIZE,
                actual: initial_scores.len(),
            });
        }

        let state = PendingConsensus {
            item,
            current: initial_scores.iter().map(RawScore::as_f64).collect(),
            initial_scores: initial_scores.to_vec(),
            evaluator_count: INITIAL_PANEL_SIZE,
            rounds_used: 1,
            max_evaluators: self.max_evaluators,
        };

        Ok(state.settle())
    }

    /// Synchronous driver over `begin`/`advance` for non-async callers.
    ///
    /// `request_more` receives the number of additional scores needed and
    /// must return exactly that many.
    pub fn resolve_with<F>(
        &self,
        item: ItemId,
        initial_scores: &[RawScore],
        mut request_more: F,
    ) -> Result<ConsensusResult, ScoringError>
    where
        F: FnMut(usize) -> Result<Vec<RawScore>, ScoringError>,
    {
        let mut step = self.begin(item, initial_scores)?;
        loop {
            match step {
                ConsensusStep::Resolved(result) => return Ok(result),
                ConsensusStep::NeedMore(pending) => {
                    let new_scores = request_more(pending.requested())?;
                    step = pending.advance(&new_scores)?;
                }
            }
        }
    }
}

impl Default for ConsensusEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the resolution state machine
#[derive(Debug, Clone)]
pub enum ConsensusStep {
    /// Resolution finished.
    Resolved(ConsensusResult),
    /// The panel disagrees badly and must grow before resolving.
    NeedMore(PendingConsensus),
}

/// An unresolved consensus waiting for more evaluator scores
///
/// The previous round has already been consolidated into a single
/// representative value; `advance` combines it with the newly obtained
/// scores and re-runs the resolution rules.
#[derive(Debug, Clone)]
pub struct PendingConsensus {
    item: ItemId,
    /// Current list: at the point of suspension this holds only the
    /// consolidated representative of the previous round.
    current: Vec<f64>,
    initial_scores: Vec<RawScore>,
    evaluator_count: usize,
    rounds_used: usize,
    max_evaluators: usize,
}

impl PendingConsensus {
    /// How many additional scores the next round needs.
    pub fn requested(&self) -> usize {
        SCORES_PER_EXPANSION
    }

    /// Evaluators consumed so far (monotone, never exceeds the ceiling).
    pub fn evaluator_count(&self) -> usize {
        self.evaluator_count
    }

    /// Rounds completed so far.
    pub fn rounds_used(&self) -> usize {
        self.rounds_used
    }

    pub fn item(&self) -> &ItemId {
        &self.item
    }

    /// Feed the newly obtained scores and run the next round.
    ///
    /// The evaluator collaborator must deliver exactly the requested count;
    /// anything else is a contract breach, never papered over with
    /// defaults.
    pub fn advance(mut self, new_scores: &[RawScore]) -> Result<ConsensusStep, ScoringError> {
        if new_scores.len() != self.requested() {
            return Err(ScoringError::EvaluatorShortfall {
                requested: self.requested(),
                received: new_scores.len(),
            });
        }

        self.current.extend(new_scores.iter().map(RawScore::as_f64));
        self.evaluator_count += new_scores.len();
        self.rounds_used += 1;

        Ok(self.settle())
    }

    /// Apply the resolution rules to the current list.
    fn settle(mut self) -> ConsensusStep {
        let current_spread = spread(&self.current);

        if current_spread == 0.0 {
            // Complete agreement, regardless of how many rounds it took.
            let score = self.current[0];
            return self.resolved(score, ConsensusMethod::Perfect);
        }

        if current_spread <= 2.0 {
            let score = mean(&self.current);
            let method = if self.rounds_used == 1 {
                ConsensusMethod::Minor
            } else {
                ConsensusMethod::ConsolidatedRecurse
            };
            return self.resolved(score, method);
        }

        // Major disagreement: both scale extremes are present. Only grow
        // the panel when the expansion fits under the ceiling; a ceiling
        // the 3 + 2k progression cannot land on must still bound the count.
        if self.evaluator_count + SCORES_PER_EXPANSION <= self.max_evaluators {
            let consolidated = consolidate(&self.current);
            self.current = vec![consolidated];
            ConsensusStep::NeedMore(self)
        } else {
            self.force()
        }
    }

    /// Evaluator ceiling reached: drop the most-outlying score and settle
    /// on the mean of the remainder.
    fn force(mut self) -> ConsensusStep {
        let median = median(&self.current);
        let mut outlier = 0;
        for (i, &value) in self.current.iter().enumerate() {
            if (value - median).abs() >= (self.current[outlier] - median).abs() {
                outlier = i;
            }
        }
        self.current.remove(outlier);

        let score = mean(&self.current);
        self.resolved(score, ConsensusMethod::Forced)
    }

    fn resolved(self, consensus_score: f64, method: ConsensusMethod) -> ConsensusStep {
        ConsensusStep::Resolved(ConsensusResult {
            item: self.item,
            consensus_score,
            contributing_scores: self.current,
            initial_scores: self.initial_scores,
            evaluator_count: self.evaluator_count,
            method,
            rounds_used: self.rounds_used,
        })
    }
}

/// Collapse a badly split round into one representative value: the median
/// when a clear majority exists (some value repeats), the mean when the
/// judgment is fully split.
fn consolidate(values: &[f64]) -> f64 {
    let has_repeat = values
        .iter()
        .enumerate()
        .any(|(i, a)| values[i + 1..].iter().any(|b| a == b));

    if has_repeat { median(values) } else { mean(values) }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(values: &[u8]) -> Vec<RawScore> {
        values.iter().map(|&v| RawScore::new(v).unwrap()).collect()
    }

    fn resolve_scripted(
        engine: &ConsensusEngine,
        initial: &[u8],
        script: &[u8],
    ) -> ConsensusResult {
        let mut queue: std::collections::VecDeque<RawScore> = raws(script).into();
        engine
            .resolve_with("q01".into(), &raws(initial), |count| {
                let scores: Vec<RawScore> = queue.drain(..count.min(queue.len())).collect();
                if scores.len() < count {
                    return Err(ScoringError::EvaluatorShortfall {
                        requested: count,
                        received: scores.len(),
                    });
                }
                Ok(scores)
            })
            .unwrap()
    }

    #[test]
    fn test_perfect_consensus() {
        let engine = ConsensusEngine::new();
        let result = resolve_scripted(&engine, &[3, 3, 3], &[]);

        assert_eq!(result.method, ConsensusMethod::Perfect);
        assert_eq!(result.consensus_score, 3.0);
        assert_eq!(result.evaluator_count, 3);
        assert_eq!(result.rounds_used, 1);
        assert!(result.is_unanimous());
    }

    #[test]
    fn test_minor_disagreement_takes_mean() {
        let engine = ConsensusEngine::new();
        let result = resolve_scripted(&engine, &[3, 3, 5], &[]);

        assert_eq!(result.method, ConsensusMethod::Minor);
        assert!((result.consensus_score - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.contributing_scores, vec![3.0, 3.0, 5.0]);
    }

    #[test]
    fn test_minor_covers_all_adjacent_mixes() {
        let engine = ConsensusEngine::new();
        for initial in [[1, 1, 3], [1, 3, 3], [3, 3, 5], [3, 5, 5]] {
            let result = resolve_scripted(&engine, &initial, &[]);
            assert_eq!(result.method, ConsensusMethod::Minor, "{initial:?}");
        }
    }

    #[test]
    fn test_fully_split_consolidates_to_mean_then_perfect() {
        // [1,3,5]: no repeats, consolidate to mean 3.0; new round [3.0, 3, 3]
        // has spread 0, so the outcome is perfect at 3.0 in two rounds.
        let engine = ConsensusEngine::new();
        let result = resolve_scripted(&engine, &[1, 3, 5], &[3, 3]);

        assert_eq!(result.method, ConsensusMethod::Perfect);
        assert_eq!(result.consensus_score, 3.0);
        assert_eq!(result.rounds_used, 2);
        assert_eq!(result.evaluator_count, 5);
        assert_eq!(result.contributing_scores, vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_majority_consolidates_to_median() {
        // [1,1,5]: 1 repeats, consolidate to median 1; new round [1,3,3]
        // has spread 2 after recursion.
        let engine = ConsensusEngine::new();
        let result = resolve_scripted(&engine, &[1, 1, 5], &[3, 3]);

        assert_eq!(result.method, ConsensusMethod::ConsolidatedRecurse);
        assert!((result.consensus_score - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.rounds_used, 2);
        assert_eq!(result.evaluator_count, 5);
        assert_eq!(result.contributing_scores, vec![1.0, 3.0, 3.0]);
    }

    #[test]
    fn test_forced_consensus_at_ceiling() {
        // Every round splits to the extremes: 3 → 5 → 7 evaluators, then
        // the ceiling forces a consensus by dropping the worst outlier.
        let engine = ConsensusEngine::new();
        let result = resolve_scripted(&engine, &[1, 1, 5], &[1, 5, 1, 5]);

        assert_eq!(result.method, ConsensusMethod::Forced);
        assert_eq!(result.evaluator_count, 7);
        assert_eq!(result.rounds_used, 3);
        // Final round was [1, 1, 5]; median 1, the 5 is dropped.
        assert_eq!(result.contributing_scores, vec![1.0, 1.0]);
        assert_eq!(result.consensus_score, 1.0);
    }

    #[test]
    fn test_evaluator_count_never_exceeds_ceiling() {
        let engine = ConsensusEngine::new();
        let result = resolve_scripted(&engine, &[1, 1, 5], &[1, 5, 1, 5, 1, 5, 1, 5]);
        assert!(result.evaluator_count <= engine.max_evaluators());
    }

    #[test]
    fn test_wrong_initial_count_rejected() {
        let engine = ConsensusEngine::new();
        let err = engine.begin("q01".into(), &raws(&[3, 3])).unwrap_err();
        assert_eq!(
            err,
            ScoringError::WrongInitialCount {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_shortfall_surfaces_instead_of_padding() {
        let engine = ConsensusEngine::new();
        let step = engine.begin("q01".into(), &raws(&[1, 1, 5])).unwrap();
        let ConsensusStep::NeedMore(pending) = step else {
            panic!("spread 4 must request more scores");
        };

        let err = pending.advance(&raws(&[3])).unwrap_err();
        assert_eq!(
            err,
            ScoringError::EvaluatorShortfall {
                requested: 2,
                received: 1
            }
        );
    }

    #[test]
    fn test_pending_state_accessors() {
        let engine = ConsensusEngine::new();
        let step = engine.begin("q42".into(), &raws(&[1, 3, 5])).unwrap();
        let ConsensusStep::NeedMore(pending) = step else {
            panic!("fully split panel must request more scores");
        };

        assert_eq!(pending.requested(), 2);
        assert_eq!(pending.evaluator_count(), 3);
        assert_eq!(pending.rounds_used(), 1);
        assert_eq!(pending.item().as_str(), "q42");
    }

    #[test]
    fn test_custom_ceiling_forces_immediately() {
        // With a ceiling of 3 there is no room to expand; a split panel is
        // forced in round one.
        let engine = ConsensusEngine::with_max_evaluators(3);
        let result = resolve_scripted(&engine, &[1, 1, 5], &[]);

        assert_eq!(result.method, ConsensusMethod::Forced);
        assert_eq!(result.evaluator_count, 3);
        assert_eq!(result.contributing_scores, vec![1.0, 1.0]);
    }

    #[test]
    fn test_unreachable_ceiling_still_bounds_count() {
        // The panel grows 3 → 5 → 7; a ceiling of 4 sits between steps.
        // Expansion must not overshoot it: the split panel is forced at 3.
        let engine = ConsensusEngine::with_max_evaluators(4);
        let result = resolve_scripted(&engine, &[1, 1, 5], &[3, 3]);

        assert_eq!(result.method, ConsensusMethod::Forced);
        assert!(result.evaluator_count <= 4);
        assert_eq!(result.evaluator_count, 3);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[1.0, 3.0, 5.0]), 3.0);
        assert_eq!(median(&[1.0, 5.0]), 3.0);
        assert_eq!(median(&[5.0, 1.0, 1.0]), 1.0);
    }
}
