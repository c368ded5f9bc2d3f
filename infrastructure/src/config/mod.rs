//! Configuration file loading for trait-panel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Explicitly specified config file
//! 2. Project root: `./panel.toml` or `./.panel.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/trait-panel/config.toml`
//! 4. Fallback: `~/.config/trait-panel/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileLoggingConfig, FileScoringConfig};
pub use loader::ConfigLoader;
