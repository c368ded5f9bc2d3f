//! Score-respondent use case
//!
//! Resolves every item of one respondent's test battery and aggregates the
//! results into a trait profile. Items are independent, so they resolve in
//! parallel (bounded fan-out); aggregation is a strict barrier because the
//! trait weights normalize across the whole item set.

use crate::config::ScoringParams;
use crate::ports::evaluator::Evaluator;
use crate::ports::progress::{NoProgress, ScoringProgress};
use crate::use_cases::score_item::{ItemScore, ScoreItemUseCase};
use panel_domain::{
    DataQualityWarning, DimensionVector, Item, ItemId, ProfileAggregator, ScoringError,
    TraitProfile,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that can occur during respondent scoring
#[derive(Error, Debug)]
pub enum ScoreRespondentError {
    #[error("No items to score")]
    NoItems,

    #[error("Every item failed to resolve")]
    AllItemsFailed,

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] ScoringError),
}

/// Scoring outcome for one respondent
///
/// `is_complete` is false when any item failed to resolve: the profile
/// then covers only the items that did resolve, an observable fact the
/// caller must surface rather than hide.
#[derive(Debug)]
pub struct RespondentReport {
    pub profile: TraitProfile,
    pub item_scores: Vec<ItemScore>,
    pub failed_items: Vec<(ItemId, String)>,
    pub warnings: Vec<DataQualityWarning>,
    pub is_complete: bool,
}

/// Use case for scoring a whole respondent
pub struct ScoreRespondentUseCase<E: Evaluator + 'static> {
    item_use_case: ScoreItemUseCase<E>,
    aggregator: ProfileAggregator,
    max_concurrent_items: usize,
}

impl<E: Evaluator + 'static> ScoreRespondentUseCase<E> {
    pub fn new(evaluator: Arc<E>, params: &ScoringParams) -> Self {
        Self {
            item_use_case: ScoreItemUseCase::new(evaluator, params),
            aggregator: ProfileAggregator::new(),
            max_concurrent_items: params.max_concurrent_items.max(1),
        }
    }

    /// Execute with no progress reporting and no cancellation.
    pub async fn execute(&self, items: &[Item]) -> Result<RespondentReport, ScoreRespondentError> {
        self.execute_with_progress(items, Arc::new(NoProgress), CancellationToken::new())
            .await
    }

    /// Execute with progress callbacks and a cancellation token.
    pub async fn execute_with_progress(
        &self,
        items: &[Item],
        progress: Arc<dyn ScoringProgress>,
        cancel: CancellationToken,
    ) -> Result<RespondentReport, ScoreRespondentError> {
        if items.is_empty() {
            return Err(ScoreRespondentError::NoItems);
        }

        info!(items = items.len(), "scoring respondent");

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_items));
        let mut join_set = JoinSet::new();

        for (index, item) in items.iter().cloned().enumerate() {
            let use_case = self.item_use_case.clone();
            let progress = Arc::clone(&progress);
            let cancel = cancel.clone();
            let semaphore = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = use_case
                    .execute_with_progress(&item, progress.as_ref(), &cancel)
                    .await;
                (index, item, result)
            });
        }

        let mut slots: Vec<Option<ItemScore>> = (0..items.len()).map(|_| None).collect();
        let mut failed_items = Vec::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, _, Ok(score))) => {
                    slots[index] = Some(score);
                }
                Ok((index, item, Err(e))) => {
                    warn!(item = %item.id, "item failed: {e}");
                    progress.on_item_failed(&item.id, &e.to_string());
                    failed_items.push((index, item.id, e.to_string()));
                }
                Err(e) => {
                    warn!("task join error: {e}");
                }
            }
        }

        // Aggregation barrier: fold whatever resolved, in battery order.
        let item_scores: Vec<ItemScore> = slots.into_iter().flatten().collect();
        if item_scores.is_empty() {
            return Err(ScoreRespondentError::AllItemsFailed);
        }
        failed_items.sort_by_key(|(index, _, _)| *index);
        let failed_items: Vec<(ItemId, String)> = failed_items
            .into_iter()
            .map(|(_, id, error)| (id, error))
            .collect();

        let vectors: Vec<DimensionVector> = item_scores.iter().map(|s| s.vector).collect();
        let scored_items: Vec<Item> = item_scores.iter().map(|s| s.item.clone()).collect();
        let aggregation = self.aggregator.aggregate(&vectors, &scored_items)?;

        // Expansion and aggregation can both flag the same unknown-dimension
        // item; report each finding once.
        let mut warnings: Vec<DataQualityWarning> = Vec::new();
        for warning in item_scores
            .iter()
            .flat_map(|s| s.warnings.iter())
            .chain(aggregation.warnings.iter())
        {
            if !warnings.contains(warning) {
                warnings.push(warning.clone());
            }
        }

        for warning in &warnings {
            warn!("data quality: {warning}");
        }

        let is_complete = failed_items.is_empty();
        info!(
            scored = item_scores.len(),
            failed = failed_items.len(),
            typology = %aggregation.profile.typology,
            complete = is_complete,
            "respondent scored"
        );
        progress.on_respondent_complete(item_scores.len(), failed_items.len());

        Ok(RespondentReport {
            profile: aggregation.profile,
            item_scores,
            failed_items,
            warnings,
            is_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::evaluator::EvaluatorError;
    use async_trait::async_trait;
    use panel_domain::{Judgment, RawScore, TraitDimension};
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Evaluator that answers each item with a fixed score, and fails the
    /// items named in `failing`.
    struct FixedPanel {
        answers: HashMap<String, u8>,
        failing: Vec<String>,
        concurrent: Mutex<usize>,
        peak_concurrent: Mutex<usize>,
    }

    impl FixedPanel {
        fn new(answers: &[(&str, u8)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(id, score)| (id.to_string(), *score))
                    .collect(),
                failing: Vec::new(),
                concurrent: Mutex::new(0),
                peak_concurrent: Mutex::new(0),
            }
        }

        fn failing(mut self, item: &str) -> Self {
            self.failing.push(item.to_string());
            self
        }
    }

    #[async_trait]
    impl Evaluator for FixedPanel {
        async fn obtain_scores(
            &self,
            item: &Item,
            count: usize,
        ) -> Result<Vec<Judgment>, EvaluatorError> {
            {
                let mut concurrent = self.concurrent.lock().unwrap();
                *concurrent += 1;
                let mut peak = self.peak_concurrent.lock().unwrap();
                *peak = (*peak).max(*concurrent);
            }
            tokio::task::yield_now().await;
            *self.concurrent.lock().unwrap() -= 1;

            if self.failing.contains(&item.id.as_str().to_string()) {
                return Err(EvaluatorError::RequestFailed("provider down".into()));
            }

            let score = self.answers.get(item.id.as_str()).copied().unwrap_or(3);
            Ok((0..count)
                .map(|i| {
                    Judgment::new(
                        format!("judge-{i}").as_str(),
                        item.id.clone(),
                        RawScore::new(score).unwrap(),
                    )
                })
                .collect())
        }
    }

    fn battery() -> Vec<Item> {
        vec![
            Item::new("q01", TraitDimension::Openness),
            Item::new("q02", TraitDimension::Conscientiousness),
            Item::new("q03", TraitDimension::Extraversion),
            Item::new("q04", TraitDimension::Agreeableness),
            Item::new("q05", TraitDimension::Neuroticism),
        ]
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_full_battery_produces_complete_report() {
        let evaluator = Arc::new(FixedPanel::new(&[
            ("q01", 5),
            ("q02", 5),
            ("q03", 5),
            ("q04", 5),
            ("q05", 1),
        ]));
        let use_case = ScoreRespondentUseCase::new(evaluator, &ScoringParams::default());

        let report = use_case.execute(&battery()).await.unwrap();

        assert!(report.is_complete);
        assert_eq!(report.item_scores.len(), 5);
        assert!(report.failed_items.is_empty());
        // High O/C/E/A, low N: an ENFJ battery.
        assert_eq!(report.profile.typology.as_str(), "ENFJ");
    }

    #[tokio::test]
    async fn test_item_order_is_preserved() {
        let evaluator = Arc::new(FixedPanel::new(&[]));
        let use_case = ScoreRespondentUseCase::new(evaluator, &ScoringParams::default());

        let report = use_case.execute(&battery()).await.unwrap();
        let ids: Vec<&str> = report
            .item_scores
            .iter()
            .map(|s| s.item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["q01", "q02", "q03", "q04", "q05"]);
    }

    #[tokio::test]
    async fn test_failed_item_marks_report_partial() {
        let evaluator = Arc::new(FixedPanel::new(&[("q01", 5)]).failing("q03"));
        let use_case = ScoreRespondentUseCase::new(evaluator, &ScoringParams::default());

        let report = use_case.execute(&battery()).await.unwrap();

        assert!(!report.is_complete);
        assert_eq!(report.item_scores.len(), 4);
        assert_eq!(report.failed_items.len(), 1);
        assert_eq!(report.failed_items[0].0.as_str(), "q03");
        // The remaining items still aggregated.
        assert_eq!(report.profile.items_scored, 4);
    }

    #[tokio::test]
    async fn test_all_items_failed() {
        let evaluator = Arc::new(
            FixedPanel::new(&[])
                .failing("q01")
                .failing("q02")
                .failing("q03")
                .failing("q04")
                .failing("q05"),
        );
        let use_case = ScoreRespondentUseCase::new(evaluator, &ScoringParams::default());

        let error = use_case.execute(&battery()).await.unwrap_err();
        assert!(matches!(error, ScoreRespondentError::AllItemsFailed));
    }

    #[tokio::test]
    async fn test_empty_battery_rejected() {
        let evaluator = Arc::new(FixedPanel::new(&[]));
        let use_case = ScoreRespondentUseCase::new(evaluator, &ScoringParams::default());

        let error = use_case.execute(&[]).await.unwrap_err();
        assert!(matches!(error, ScoreRespondentError::NoItems));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let evaluator = Arc::new(FixedPanel::new(&[]));
        let params = ScoringParams::default().with_max_concurrent_items(1);
        let use_case = ScoreRespondentUseCase::new(Arc::clone(&evaluator), &params);

        use_case.execute(&battery()).await.unwrap();
        assert_eq!(*evaluator.peak_concurrent.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_fails_pending_items() {
        let evaluator = Arc::new(FixedPanel::new(&[]));
        let use_case = ScoreRespondentUseCase::new(evaluator, &ScoringParams::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = use_case
            .execute_with_progress(&battery(), Arc::new(NoProgress), cancel)
            .await
            .unwrap_err();
        assert!(matches!(error, ScoreRespondentError::AllItemsFailed));
    }
}
