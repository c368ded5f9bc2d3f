//! Domain error types

use thiserror::Error;

/// Domain-level scoring errors
///
/// These are fatal for the item being scored. Data-quality problems that
/// only degrade a score live in [`crate::quality::DataQualityWarning`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Initial panel must have exactly {expected} scores, got {actual}")]
    WrongInitialCount { expected: usize, actual: usize },

    #[error("Score {0} is not on the {{1, 3, 5}} scale")]
    OutOfScale(u8),

    #[error("Evaluator shortfall: requested {requested} scores, received {received}")]
    EvaluatorShortfall { requested: usize, received: usize },

    #[error("Mismatched aggregation inputs: {vectors} vectors for {items} items")]
    MismatchedInputs { vectors: usize, items: usize },
}

impl ScoringError {
    /// Check whether this error means the evaluator collaborator under-delivered.
    pub fn is_shortfall(&self) -> bool {
        matches!(self, ScoringError::EvaluatorShortfall { .. })
    }
}
