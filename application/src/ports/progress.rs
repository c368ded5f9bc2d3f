//! Progress notification port
//!
//! Defines the interface for reporting scoring progress. Implementations
//! live outside the core (console, batch monitor, test probes) and only
//! override the callbacks they care about; every method has a no-op
//! default.

use panel_domain::{ConsensusMethod, ItemId, ReliabilityMetrics};

/// Callback for progress updates during respondent scoring
pub trait ScoringProgress: Send + Sync {
    /// Called when an item's resolution begins.
    fn on_item_start(&self, _item: &ItemId) {}

    /// Called at each consensus round boundary, after the panel grew.
    fn on_round(&self, _item: &ItemId, _round: usize, _evaluator_count: usize) {}

    /// Called when an item resolves successfully.
    fn on_item_complete(&self, _item: &ItemId, _method: ConsensusMethod, _metrics: &ReliabilityMetrics) {
    }

    /// Called when an item's resolution fails fatally.
    fn on_item_failed(&self, _item: &ItemId, _error: &str) {}

    /// Called after the aggregation barrier, once per respondent.
    fn on_respondent_complete(&self, _items_scored: usize, _items_failed: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ScoringProgress for NoProgress {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_accepts_all_callbacks() {
        let progress = NoProgress;
        progress.on_item_start(&ItemId::new("q01"));
        progress.on_round(&ItemId::new("q01"), 2, 5);
        progress.on_item_failed(&ItemId::new("q01"), "boom");
        progress.on_respondent_complete(49, 1);
    }
}
