//! Configuration errors.

use thiserror::Error;
use trading_core::IndicatorError;

/// Errors raised while loading configuration or building from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid indicator '{name}': {source}")]
    Indicator {
        name: String,
        #[source]
        source: IndicatorError,
    },

    #[error("Duplicate indicator name: {0}")]
    DuplicateName(String),

    #[error("Failed to install logging: {0}")]
    Logging(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
