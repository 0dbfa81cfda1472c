//! Configuration management.
//!
//! Indicators are declared in TOML and built for either numeric backend:
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [[indicators]]
//! name = "trend"
//! kind = "macd"
//!
//! [[indicators]]
//! name = "stop"
//! kind = "psar"
//! step = 0.02
//! max = 0.2
//! ```

mod engine;
mod error;
mod indicator;
mod logging;
mod settings;

pub use engine::IndicatorSet;
pub use error::{ConfigError, ConfigResult};
pub use indicator::{AnyIndicator, IndicatorValue};
pub use logging::setup_logging;
pub use settings::{EngineConfig, IndicatorSpec, LogFormat, LoggingConfig, NamedIndicator};

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

fn environment() -> Environment {
    Environment::with_prefix("TRADING")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> ConfigResult<EngineConfig> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Load configuration from a TOML string, with the same environment overrides.
pub fn load_config_str(toml: &str) -> ConfigResult<EngineConfig> {
    let config = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .add_source(environment())
        .build()?;

    Ok(config.try_deserialize()?)
}
