//! OHLCV (Open, High, Low, Close, Volume) candles.

use serde::{Deserialize, Serialize};

use crate::numeric::{partial_max, Numeric};

/// One period of market data.
///
/// Generic over the numeric backend so the same candle shape feeds both the
/// fast (`f64`) and the precise (`Decimal`) indicators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Candle<T> {
    /// Opening price
    pub open: T,
    /// Highest price
    pub high: T,
    /// Lowest price
    pub low: T,
    /// Closing price
    pub close: T,
    /// Trading volume, when the feed provides one
    #[serde(default)]
    pub volume: Option<T>,
}

impl<T: Numeric> Candle<T> {
    /// Create a candle without volume.
    pub fn new(open: T, high: T, low: T, close: T) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Candle from high, low and close, with the open set to the close.
    pub fn hlc(high: T, low: T, close: T) -> Self {
        Self::new(close, high, low, close)
    }

    /// Attach a volume.
    pub fn with_volume(mut self, volume: T) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Median price `(high + low) / 2`.
    ///
    /// Prices at the edge of the numeric range are halved before adding, and
    /// the result saturates at the larger price.
    #[inline]
    pub fn median(&self) -> T {
        let two = T::from_int(2);
        match self.high.checked_add(self.low) {
            Some(sum) => sum / two,
            None => (self.high / two)
                .checked_add(self.low / two)
                .unwrap_or_else(|| partial_max(self.high, self.low)),
        }
    }

    /// Typical price `(high + low + close) / 3`, saturating like [`Candle::median`].
    #[inline]
    pub fn typical(&self) -> T {
        let three = T::from_int(3);
        let sum = self
            .high
            .checked_add(self.low)
            .and_then(|sum| sum.checked_add(self.close));
        match sum {
            Some(sum) => sum / three,
            None => (self.high / three)
                .checked_add(self.low / three)
                .and_then(|sum| sum.checked_add(self.close / three))
                .unwrap_or_else(|| partial_max(partial_max(self.high, self.low), self.close)),
        }
    }

    /// Bar range `high - low`.
    #[inline]
    pub fn range(&self) -> T {
        self.high - self.low
    }

    /// Volume, with a missing value counted as zero.
    #[inline]
    pub fn volume_or_zero(&self) -> T {
        self.volume.unwrap_or_else(T::zero)
    }
}
