//! Score-item use case
//!
//! Resolves one assessment item end to end: obtain the initial judgment
//! panel, drive the consensus state machine (growing the panel on demand),
//! then derive reliability metrics and the five-dimension vector.

use crate::config::ScoringParams;
use crate::ports::evaluator::{Evaluator, EvaluatorError};
use crate::ports::progress::{NoProgress, ScoringProgress};
use panel_domain::{
    ConsensusEngine, ConsensusResult, ConsensusStep, DataQualityWarning, DimensionExpander,
    DimensionVector, Item, Judgment, RawScore, ReliabilityCalculator, ReliabilityMetrics,
    ScoringError, INITIAL_PANEL_SIZE,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur while scoring an item
#[derive(Error, Debug)]
pub enum ScoreItemError {
    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Item resolution cancelled")]
    Cancelled,
}

/// Everything this core produces for one item
#[derive(Debug, Clone)]
pub struct ItemScore {
    pub item: Item,
    pub consensus: ConsensusResult,
    pub reliability: ReliabilityMetrics,
    pub vector: DimensionVector,
    pub warnings: Vec<DataQualityWarning>,
    /// Every judgment collected for the item, in acquisition order.
    pub judgments: Vec<Judgment>,
}

/// Use case for resolving a single item
pub struct ScoreItemUseCase<E: Evaluator + 'static> {
    evaluator: Arc<E>,
    engine: ConsensusEngine,
    expander: DimensionExpander,
    reliability: ReliabilityCalculator,
}

impl<E: Evaluator + 'static> Clone for ScoreItemUseCase<E> {
    fn clone(&self) -> Self {
        Self {
            evaluator: Arc::clone(&self.evaluator),
            engine: self.engine.clone(),
            expander: self.expander,
            reliability: self.reliability,
        }
    }
}

impl<E: Evaluator + 'static> ScoreItemUseCase<E> {
    pub fn new(evaluator: Arc<E>, params: &ScoringParams) -> Self {
        Self {
            evaluator,
            engine: ConsensusEngine::with_max_evaluators(params.max_evaluators),
            expander: DimensionExpander::new(params.fill_mode),
            reliability: ReliabilityCalculator::new(),
        }
    }

    /// Execute with no progress reporting and no cancellation.
    pub async fn execute(&self, item: &Item) -> Result<ItemScore, ScoreItemError> {
        self.execute_with_progress(item, &NoProgress, &CancellationToken::new())
            .await
    }

    /// Execute with progress callbacks and a cancellation token.
    ///
    /// Cancellation is honored at round boundaries, between calls to the
    /// evaluator, where no partial state needs rolling back.
    pub async fn execute_with_progress(
        &self,
        item: &Item,
        progress: &dyn ScoringProgress,
        cancel: &CancellationToken,
    ) -> Result<ItemScore, ScoreItemError> {
        progress.on_item_start(&item.id);
        debug!(item = %item.id, "starting item resolution");

        let mut judgments = self.obtain(item, INITIAL_PANEL_SIZE, cancel).await?;
        let initial_scores: Vec<RawScore> = judgments.iter().map(|j| j.raw_score).collect();

        let mut step = self.engine.begin(item.id.clone(), &initial_scores)?;
        let consensus = loop {
            match step {
                ConsensusStep::Resolved(result) => break result,
                ConsensusStep::NeedMore(pending) => {
                    let requested = pending.requested();
                    debug!(
                        item = %item.id,
                        round = pending.rounds_used(),
                        evaluators = pending.evaluator_count(),
                        "panel split, requesting {requested} more judgments"
                    );
                    let new_judgments = self.obtain(item, requested, cancel).await?;
                    let new_scores: Vec<RawScore> =
                        new_judgments.iter().map(|j| j.raw_score).collect();
                    judgments.extend(new_judgments);

                    step = pending.advance(&new_scores)?;
                    if let ConsensusStep::NeedMore(ref next) = step {
                        progress.on_round(&item.id, next.rounds_used(), next.evaluator_count());
                    }
                }
            }
        };

        let reliability = self.reliability.reliability(&consensus);
        let expansion = self.expander.expand(&consensus, item, &judgments);

        info!(
            item = %item.id,
            method = %consensus.method,
            rounds = consensus.rounds_used,
            evaluators = consensus.evaluator_count,
            reliability = reliability.overall,
            "item resolved"
        );
        progress.on_item_complete(&item.id, consensus.method, &reliability);

        Ok(ItemScore {
            item: item.clone(),
            consensus,
            reliability,
            vector: expansion.vector,
            warnings: expansion.warnings,
            judgments,
        })
    }

    /// Obtain exactly `count` judgments, surfacing shortfalls instead of
    /// padding with defaults.
    async fn obtain(
        &self,
        item: &Item,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Judgment>, ScoreItemError> {
        if cancel.is_cancelled() {
            return Err(ScoreItemError::Cancelled);
        }

        let judgments = self.evaluator.obtain_scores(item, count).await?;
        if judgments.len() != count {
            return Err(EvaluatorError::Shortfall {
                requested: count,
                received: judgments.len(),
            }
            .into());
        }
        Ok(judgments)
    }
}
