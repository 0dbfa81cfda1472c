//! Volume flow indicators: OBV and VWAP.

use trading_core::{
    Candle, Indicator, IndicatorResult, IndicatorSeries, Numeric, Rollback, Series, Signal,
    SignalIndicator, SignalTracker, TrendState,
};

use crate::signals::versus_previous;

#[derive(Debug, Clone, Copy, Default)]
struct ObvState<T> {
    previous_close: Option<T>,
    total: T,
}

/// On-Balance Volume (OBV) by Joseph Granville.
///
/// Adds the candle's volume when the close rises, subtracts it when the close
/// falls and carries the total over unchanged closes. Candles without volume
/// count as zero volume. The signal compares each total with the one before.
#[derive(Debug, Clone)]
pub struct Obv<T> {
    state: Rollback<ObvState<T>>,
    series: Series<T>,
    trend: SignalTracker<TrendState>,
}

impl<T: Numeric> Default for Obv<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Obv<T> {
    pub fn new() -> Self {
        Self {
            state: Rollback::new(ObvState::default()),
            series: Series::new(),
            trend: SignalTracker::new(),
        }
    }
}

impl<T: Numeric> Indicator for Obv<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let state = self.state.begin(replace);

        let result = state.previous_close.and_then(|previous| {
            let volume = candle.volume_or_zero();
            if candle.close > previous {
                state.total = state.total.checked_add(volume)?;
            } else if candle.close < previous {
                state.total = state.total.checked_sub(volume)?;
            }
            Some(state.total)
        });
        state.previous_close = Some(candle.close);

        self.series.record(result, replace);
        let previous = self.series.previous();
        self.trend
            .record(result.map(|total| versus_previous(total, previous)), replace);
        result
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.series.get().is_some()
    }

    fn required_inputs(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "OBV"
    }
}

impl<T: Numeric> SignalIndicator for Obv<T> {
    type State = TrendState;

    fn signal(&self) -> Signal<TrendState> {
        self.trend.signal()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct VwapState<T> {
    weighted_price: T,
    volume: T,
}

/// Volume Weighted Average Price (VWAP).
///
/// Cumulative typical price weighted by volume since the first candle. The
/// session never resets; start a new instance for a new session. Candles
/// without volume leave the average untouched and produce no result.
#[derive(Debug, Clone)]
pub struct Vwap<T> {
    state: Rollback<VwapState<T>>,
    series: Series<T>,
}

impl<T: Numeric> Default for Vwap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Vwap<T> {
    pub fn new() -> Self {
        Self {
            state: Rollback::new(VwapState::default()),
            series: Series::new(),
        }
    }

    /// Volume accumulated so far.
    pub fn volume(&self) -> T {
        self.state.current().volume
    }
}

impl<T: Numeric> Indicator for Vwap<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let state = self.state.begin(replace);

        let volume = candle.volume_or_zero();
        let result = if volume > T::zero() {
            let accumulated = candle
                .typical()
                .checked_mul(volume)
                .and_then(|weighted| state.weighted_price.checked_add(weighted))
                .zip(state.volume.checked_add(volume));
            accumulated.and_then(|(weighted_price, volume)| {
                let vwap = weighted_price.checked_div(volume)?;
                *state = VwapState {
                    weighted_price,
                    volume,
                };
                Some(vwap)
            })
        } else {
            None
        };
        self.series.record(result, replace)
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
        "VWAP"
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

impl_series!(Obv, Vwap);
