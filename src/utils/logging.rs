//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level when set.

use crate::models::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| format!("Invalid log filter '{}': {}", config.level, e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    // A second init only fails because a subscriber already exists
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    Ok(())
}
