//! Evaluator judgments
//!
//! A [`Judgment`] is one evaluator's verdict on one item. Judgments are
//! immutable once produced and are created exclusively by the Evaluator
//! collaborator; the core never synthesizes one.

use crate::dimension::TraitDimension;
use crate::item::ItemId;
use crate::scale::RawScore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier for an evaluator (a judge model behind the Evaluator port)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluatorId(String);

impl EvaluatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EvaluatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One evaluator's raw verdict on one item
///
/// `dimension_scores` is optional multi-dimension data: some evaluators
/// score the response on every trait dimension, not just the item's primary
/// one. Full-precision expansion averages these; neutral-fill ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub evaluator: EvaluatorId,
    pub item: ItemId,
    pub raw_score: RawScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_scores: Option<BTreeMap<TraitDimension, RawScore>>,
}

impl Judgment {
    /// Create a judgment carrying only the primary-scale score.
    pub fn new(evaluator: impl Into<EvaluatorId>, item: impl Into<ItemId>, raw_score: RawScore) -> Self {
        Self {
            evaluator: evaluator.into(),
            item: item.into(),
            raw_score,
            dimension_scores: None,
        }
    }

    /// Attach per-dimension scores from a multi-dimension evaluator.
    pub fn with_dimension_scores(mut self, scores: BTreeMap<TraitDimension, RawScore>) -> Self {
        self.dimension_scores = Some(scores);
        self
    }

    /// This evaluator's score on a specific dimension, if it supplied one.
    pub fn dimension_score(&self, dimension: TraitDimension) -> Option<RawScore> {
        self.dimension_scores
            .as_ref()
            .and_then(|scores| scores.get(&dimension).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judgment_creation() {
        let judgment = Judgment::new("judge-a", "q01", RawScore::HIGH);
        assert_eq!(judgment.evaluator.as_str(), "judge-a");
        assert_eq!(judgment.raw_score, RawScore::HIGH);
        assert!(judgment.dimension_scores.is_none());
    }

    #[test]
    fn test_dimension_score_lookup() {
        let mut scores = BTreeMap::new();
        scores.insert(TraitDimension::Openness, RawScore::LOW);
        let judgment = Judgment::new("judge-b", "q02", RawScore::MID).with_dimension_scores(scores);

        assert_eq!(
            judgment.dimension_score(TraitDimension::Openness),
            Some(RawScore::LOW)
        );
        assert_eq!(judgment.dimension_score(TraitDimension::Extraversion), None);
    }
}
