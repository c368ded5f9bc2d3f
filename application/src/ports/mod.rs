//! Ports (interfaces) consumed or offered by the application layer
//!
//! Following hexagonal architecture:
//! - **Evaluator** is a driven port: the scoring use cases call out through
//!   it to the external judge panel.
//! - **ScoringProgress** is an output port implemented by whoever wants to
//!   observe scoring as it happens.

pub mod evaluator;
pub mod progress;

pub use evaluator::{Evaluator, EvaluatorError};
pub use progress::{NoProgress, ScoringProgress};
