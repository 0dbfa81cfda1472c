//! Mapping of indicator results onto trading signals.

use trading_core::{Numeric, TrendState};

/// Bullish above zero, bearish below, sideways at zero.
pub(crate) fn by_sign<T: Numeric>(value: T) -> TrendState {
    if value > T::zero() {
        TrendState::Bullish
    } else if value < T::zero() {
        TrendState::Bearish
    } else {
        TrendState::Sideways
    }
}

/// Direction of `result` against the result before it.
pub(crate) fn versus_previous<T: Numeric>(result: T, previous: Option<T>) -> TrendState {
    match previous {
        None => TrendState::Unknown,
        Some(previous) => by_sign(result - previous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_sign() {
        assert_eq!(by_sign(0.5), TrendState::Bullish);
        assert_eq!(by_sign(-0.5), TrendState::Bearish);
        assert_eq!(by_sign(0.0), TrendState::Sideways);
    }

    #[test]
    fn test_versus_previous() {
        assert_eq!(versus_previous(2.0, None), TrendState::Unknown);
        assert_eq!(versus_previous(2.0, Some(1.0)), TrendState::Bullish);
        assert_eq!(versus_previous(1.0, Some(2.0)), TrendState::Bearish);
        assert_eq!(versus_previous(1.0, Some(1.0)), TrendState::Sideways);
    }
}
