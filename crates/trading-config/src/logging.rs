//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{ConfigError, ConfigResult};
use crate::settings::{LogFormat, LoggingConfig};

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn setup_logging(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .try_init(),
    };
    result.map_err(|e| ConfigError::Logging(e.to_string()))
}
