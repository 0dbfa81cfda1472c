//! True range and directional movement: TR, ATR, DX and ADX.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    partial_max, Candle, Indicator, IndicatorError, IndicatorResult, IndicatorSeries, Latest,
    Numeric, Rollback, Series,
};

use crate::moving_average::{MovingAverage, Smoothing};

/// True Range (TR).
///
/// Largest of the bar range and the gaps between the previous close and the
/// current high and low. The first candle falls back to its range.
#[derive(Debug, Clone)]
pub struct Tr<T> {
    previous_close: Rollback<Option<T>>,
    series: Series<T>,
}

impl<T: Numeric> Default for Tr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Tr<T> {
    pub fn new() -> Self {
        Self {
            previous_close: Rollback::new(None),
            series: Series::new(),
        }
    }
}

impl<T: Numeric> Indicator for Tr<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let previous = self.previous_close.begin(replace);
        let range = candle.range();
        let true_range = match previous.replace(candle.close) {
            Some(close) => partial_max(
                partial_max(range, (candle.high - close).abs()),
                (candle.low - close).abs(),
            ),
            None => range,
        };
        self.series.record(Some(true_range), replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.series.get().is_some()
    }

    fn required_inputs(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "TR"
    }
}

/// Average True Range (ATR) by J. Welles Wilder.
#[derive(Debug, Clone)]
pub struct Atr<T> {
    tr: Tr<T>,
    smoothing: MovingAverage<T>,
    series: Series<T>,
}

impl<T: Numeric> Atr<T> {
    /// Create an ATR using Wilder's smoothing.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, Smoothing::Wsma)
    }

    pub fn with_smoothing(interval: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("ATR interval", interval)?;
        Ok(Self {
            tr: Tr::new(),
            smoothing: smoothing.build(interval)?,
            series: Series::new(),
        })
    }
}

impl<T: Numeric> Indicator for Atr<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let result = self
            .tr
            .update(candle, replace)
            .and_then(|true_range| self.smoothing.update(true_range, replace));
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.smoothing.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.smoothing.required_inputs()
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

/// Positive and negative directional indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalIndex<T> {
    pub plus_di: T,
    pub minus_di: T,
}

/// Directional Movement Index (DX) by J. Welles Wilder.
///
/// Smooths the positive and negative directional movement and the true range
/// with the same algorithm, turns them into `+DI` and `-DI`, and reports
/// `100 * |+DI - -DI| / (+DI + -DI)`.
#[derive(Debug, Clone)]
pub struct Dx<T> {
    interval: usize,
    previous: Rollback<Option<Candle<T>>>,
    plus_dm: MovingAverage<T>,
    minus_dm: MovingAverage<T>,
    atr: Atr<T>,
    index: Latest<DirectionalIndex<T>>,
    series: Series<T>,
}

impl<T: Numeric> Dx<T> {
    /// Create a DX using Wilder's smoothing.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, Smoothing::Wsma)
    }

    pub fn with_smoothing(interval: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("DX interval", interval)?;
        Ok(Self {
            interval,
            previous: Rollback::new(None),
            plus_dm: smoothing.build(interval)?,
            minus_dm: smoothing.build(interval)?,
            atr: Atr::with_smoothing(interval, smoothing)?,
            index: Latest::new(),
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Latest `+DI` and `-DI`.
    pub fn directional_index(&self) -> Option<DirectionalIndex<T>> {
        self.index.get().copied()
    }

    fn directional_movement(previous: Option<Candle<T>>, candle: &Candle<T>) -> (T, T) {
        let Some(previous) = previous else {
            return (T::zero(), T::zero());
        };
        let up = candle.high - previous.high;
        let down = previous.low - candle.low;

        let plus = if up > down && up > T::zero() { up } else { T::zero() };
        let minus = if down > up && down > T::zero() { down } else { T::zero() };
        (plus, minus)
    }
}

impl<T: Numeric> Indicator for Dx<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let previous = self.previous.begin(replace).replace(candle);
        let (plus, minus) = Self::directional_movement(previous, &candle);

        let plus_dm = self.plus_dm.update(plus, replace);
        let minus_dm = self.minus_dm.update(minus, replace);
        let atr = self.atr.update(candle, replace);

        let index = match (plus_dm, minus_dm, atr) {
            (Some(plus_dm), Some(minus_dm), Some(atr)) => {
                let hundred = T::from_int(100);
                Some(if atr.is_zero() {
                    DirectionalIndex {
                        plus_di: T::zero(),
                        minus_di: T::zero(),
                    }
                } else {
                    DirectionalIndex {
                        plus_di: plus_dm / atr * hundred,
                        minus_di: minus_dm / atr * hundred,
                    }
                })
            }
            _ => None,
        };
        self.index.record(index, replace);

        let result = index.map(|DirectionalIndex { plus_di, minus_di }| {
            let sum = plus_di + minus_di;
            if sum.is_zero() {
                T::zero()
            } else {
                T::from_int(100) * (plus_di - minus_di).abs() / sum
            }
        });
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.atr.is_stable() && self.plus_dm.is_stable() && self.minus_dm.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.interval
    }

    fn name(&self) -> &str {
        "DX"
    }
}

/// ADX output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdxResult<T> {
    /// Smoothed trend strength
    pub adx: T,
    /// Positive directional indicator
    pub plus_di: T,
    /// Negative directional indicator
    pub minus_di: T,
}

/// Average Directional Index (ADX) by J. Welles Wilder.
///
/// Smoothed DX. Needs one interval to seed DX and another to seed the average,
/// so the first value arrives after `2 * interval - 1` candles.
#[derive(Debug, Clone)]
pub struct Adx<T> {
    dx: Dx<T>,
    smoothing: MovingAverage<T>,
    latest: Latest<AdxResult<T>>,
}

impl<T: Numeric> Adx<T> {
    /// Create an ADX using Wilder's smoothing.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, Smoothing::Wsma)
    }

    pub fn with_smoothing(interval: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        let dx = Dx::with_smoothing(interval, smoothing)?;
        debug!("Created ADX({}) with {:?} smoothing", interval, smoothing);
        Ok(Self {
            dx,
            smoothing: smoothing.build(interval)?,
            latest: Latest::new(),
        })
    }

    /// Underlying DX.
    pub fn dx(&self) -> &Dx<T> {
        &self.dx
    }
}

impl<T: Numeric> Indicator for Adx<T> {
    type Input = Candle<T>;
    type Output = AdxResult<T>;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<AdxResult<T>> {
        let result = self.dx.update(candle, replace).and_then(|dx| {
            let adx = self.smoothing.update(dx, replace)?;
            let index = self.dx.directional_index()?;
            Some(AdxResult {
                adx,
                plus_di: index.plus_di,
                minus_di: index.minus_di,
            })
        });
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<AdxResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.smoothing.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.dx.required_inputs() + self.smoothing.required_inputs() - 1
    }

    fn name(&self) -> &str {
        "ADX"
    }
}

macro_rules! impl_series {
    ($($ty:ident),*) => {
        $(
            impl<T: Numeric> IndicatorSeries for $ty<T> {
                fn highest(&self) -> Option<T> {
                    self.series.highest()
                }

                fn lowest(&self) -> Option<T> {
                    self.series.lowest()
                }
            }
        )*
    };
}

impl_series!(Tr, Atr, Dx);
