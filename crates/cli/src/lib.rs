//! Fieldmap CLI library (commands shared with the `fieldmap` binary)

pub mod commands;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset; keeps skipped-file warnings visible
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter from `RUST_LOG`, falling back to `DEFAULT_LOG_FILTER`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
