//! Logging initialization
//!
//! Installs the global tracing subscriber from the `[logging]` config
//! section. `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `level` is a tracing filter directive (`warn`, `info`, `debug`,
/// `trace`, or a full env-filter expression). Returns an error string if
/// a subscriber has already been installed.
pub fn init_logging(level: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| format!("invalid log filter {level:?}: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}
