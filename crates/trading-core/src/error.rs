//! Error types for the indicator engine.

use thiserror::Error;

/// Indicator errors.
///
/// Numeric degeneracies (zero ranges, zero averages) are not errors: every
/// indicator substitutes a defined value for them instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Not enough data: need at least {required} inputs")]
    NotEnoughData { required: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl IndicatorError {
    /// Reject an interval of zero.
    pub fn check_interval(name: &str, interval: usize) -> Result<usize, IndicatorError> {
        if interval == 0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "{name} must be greater than 0"
            )));
        }
        Ok(interval)
    }
}

/// Result type alias for indicator operations.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
