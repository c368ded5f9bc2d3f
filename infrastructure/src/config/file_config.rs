//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use panel_application::ScoringParams;
use panel_domain::FillMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("scoring.max_evaluators must be at least 3 (got {0})")]
    MaxEvaluatorsTooSmall(usize),

    #[error("scoring.max_evaluators must be odd so a median always exists (got {0})")]
    MaxEvaluatorsEven(usize),

    #[error("scoring.max_concurrent_items cannot be 0")]
    ZeroConcurrency,
}

/// Raw scoring configuration from TOML (`[scoring]` section)
///
/// # Example
///
/// ```toml
/// [scoring]
/// max_evaluators = 7
/// fill_mode = "full_precision"    # or "neutral_fill"
/// max_concurrent_items = 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    /// Panel size ceiling per item
    pub max_evaluators: usize,
    /// How minor dimensions are populated
    pub fill_mode: FillMode,
    /// Items resolved in parallel per respondent
    pub max_concurrent_items: usize,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        let params = ScoringParams::default();
        Self {
            max_evaluators: params.max_evaluators,
            fill_mode: params.fill_mode,
            max_concurrent_items: params.max_concurrent_items,
        }
    }
}

/// Raw logging configuration from TOML (`[logging]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Tracing filter directive ("warn", "info", "debug", "trace",
    /// or a full env-filter expression)
    pub level: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Scoring pipeline settings
    pub scoring: FileScoringConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration.
    ///
    /// The evaluator ceiling must stay odd: the forced-resolution path
    /// takes a median over the collected scores and an even panel would
    /// make the dropped-score choice ambiguous.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.scoring.max_evaluators < 3 {
            return Err(ConfigValidationError::MaxEvaluatorsTooSmall(
                self.scoring.max_evaluators,
            ));
        }
        if self.scoring.max_evaluators % 2 == 0 {
            return Err(ConfigValidationError::MaxEvaluatorsEven(
                self.scoring.max_evaluators,
            ));
        }
        if self.scoring.max_concurrent_items == 0 {
            return Err(ConfigValidationError::ZeroConcurrency);
        }
        Ok(())
    }

    /// Convert the raw scoring section into application-layer parameters.
    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams::new()
            .with_max_evaluators(self.scoring.max_evaluators)
            .with_fill_mode(self.scoring.fill_mode)
            .with_max_concurrent_items(self.scoring.max_concurrent_items)
    }
}
