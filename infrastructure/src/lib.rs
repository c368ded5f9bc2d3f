//! Infrastructure layer for trait-panel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod evaluator;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileScoringConfig,
};
pub use evaluator::ScriptedEvaluator;
pub use logging::init_logging;
