//! Scripted evaluator adapter
//!
//! Replays a fixed sequence of raw scores instead of calling a live judge
//! panel. Used for deterministic pipeline runs, calibration fixtures and
//! integration tests of the scoring stack.

use async_trait::async_trait;
use panel_application::{Evaluator, EvaluatorError};
use panel_domain::{Item, Judgment, RawScore};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

/// Evaluator that serves judgments from a pre-recorded score sequence
///
/// Scores are consumed in order across calls. When the script runs dry
/// mid-request the adapter reports a shortfall instead of padding, the
/// same contract a live panel adapter must honor.
pub struct ScriptedEvaluator {
    script: Mutex<VecDeque<RawScore>>,
    served: Mutex<usize>,
}

impl ScriptedEvaluator {
    pub fn new(scores: impl IntoIterator<Item = RawScore>) -> Self {
        Self {
            script: Mutex::new(scores.into_iter().collect()),
            served: Mutex::new(0),
        }
    }

    /// Build from plain scale values, rejecting anything outside {1, 3, 5}.
    pub fn from_values(values: &[u8]) -> Result<Self, panel_domain::ScoringError> {
        let scores = values
            .iter()
            .map(|v| RawScore::new(*v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(scores))
    }

    /// Scores not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn obtain_scores(
        &self,
        item: &Item,
        count: usize,
    ) -> Result<Vec<Judgment>, EvaluatorError> {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        let mut served = self.served.lock().unwrap_or_else(|e| e.into_inner());

        if script.len() < count {
            return Err(EvaluatorError::Shortfall {
                requested: count,
                received: script.len(),
            });
        }

        let judgments = script
            .drain(..count)
            .map(|score| {
                *served += 1;
                Judgment::new(format!("scripted-{served}").as_str(), item.id.clone(), score)
            })
            .collect();

        debug!(item = %item.id, count, remaining = script.len(), "served scripted judgments");
        Ok(judgments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::TraitDimension;

    #[tokio::test]
    async fn test_serves_scores_in_order() {
        let evaluator = ScriptedEvaluator::from_values(&[1, 3, 5, 5]).unwrap();
        let item = Item::new("q01", TraitDimension::Openness);

        let first = evaluator.obtain_scores(&item, 3).await.unwrap();
        let values: Vec<u8> = first.iter().map(|j| j.raw_score.value()).collect();
        assert_eq!(values, vec![1, 3, 5]);
        assert_eq!(evaluator.remaining(), 1);

        // Evaluator identities keep counting across calls.
        let second = evaluator.obtain_scores(&item, 1).await.unwrap();
        assert_eq!(second[0].evaluator.as_str(), "scripted-4");
    }

    #[tokio::test]
    async fn test_dry_script_is_a_shortfall() {
        let evaluator = ScriptedEvaluator::from_values(&[5]).unwrap();
        let item = Item::new("q01", TraitDimension::Openness);

        let error = evaluator.obtain_scores(&item, 2).await.unwrap_err();
        assert!(matches!(
            error,
            EvaluatorError::Shortfall {
                requested: 2,
                received: 1
            }
        ));
        // A failed request consumes nothing.
        assert_eq!(evaluator.remaining(), 1);
    }

    #[test]
    fn test_invalid_value_rejected() {
        assert!(ScriptedEvaluator::from_values(&[1, 2, 3]).is_err());
    }
}
