//! Core types and traits for the streaming indicator engine.
//!
//! This crate provides the foundational building blocks including:
//! - The numeric backend abstraction (`f64` and `Decimal`)
//! - Market data types (Candle)
//! - The rolling window, rollback snapshot and result cache used by indicators
//! - The `Indicator` contract, trend signals and the error taxonomy

pub mod buffer;
pub mod error;
pub mod history;
pub mod numeric;
pub mod series;
pub mod signal;
pub mod traits;
pub mod types;

pub use buffer::RollingWindow;
pub use error::{IndicatorError, IndicatorResult};
pub use history::Rollback;
pub use numeric::{checked_sum, partial_max, partial_min, Numeric};
pub use series::{Latest, Series};
pub use signal::{MomentumState, Signal, SignalTracker, TrendState};
pub use traits::*;
pub use types::*;
