//! # Logging Setup
//!
//! Structured logging configuration via `tracing-subscriber`.
//!
//! The transport itself only emits `tracing` events; binaries and tests
//! call [`init`] (or [`try_init`]) once at startup to install a subscriber
//! configured from [`LoggingConfig`].

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a global subscriber from the given config.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init(config: &LoggingConfig) {
    let _ = try_init(config);
}

/// Like [`init`], but reports whether a subscriber was already installed.
pub fn try_init(config: &LoggingConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| e.to_string())
}
