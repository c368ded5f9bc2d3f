//! Evaluator port
//!
//! Defines the interface for obtaining raw judgments from the external
//! judge panel. The core is agnostic to how the adapter produces them
//! (one model or many, local or cloud, with whatever retry and fallback
//! policy it likes) but it must deliver exactly the requested number of
//! valid judgments or fail loudly. Substituting a fixed neutral score for
//! a missing judgment is forbidden; failures propagate so the caller can
//! retry or abort the item.

use async_trait::async_trait;
use panel_domain::{Item, Judgment};
use thiserror::Error;

/// Errors that can occur while obtaining judgments
#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("No evaluator available for request")]
    Unavailable,

    #[error("Evaluation request failed: {0}")]
    RequestFailed(String),

    #[error("Evaluator shortfall: requested {requested} judgments, produced {received}")]
    Shortfall { requested: usize, received: usize },

    #[error("Evaluation timed out")]
    Timeout,

    #[error("Evaluation cancelled")]
    Cancelled,
}

/// Port for the external judge panel
///
/// Called once with `count == 3` to open an item, then with `count == 2`
/// per consensus round that needs the panel to grow. Adapters live in the
/// infrastructure layer.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Obtain exactly `count` raw judgments for the item.
    async fn obtain_scores(&self, item: &Item, count: usize)
    -> Result<Vec<Judgment>, EvaluatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortfall_display() {
        let error = EvaluatorError::Shortfall {
            requested: 2,
            received: 0,
        };
        assert_eq!(
            error.to_string(),
            "Evaluator shortfall: requested 2 judgments, produced 0"
        );
    }
}
