//! Range-bound oscillators: Stochastic family, CCI, Williams %R and REI.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    partial_max, partial_min, Candle, Indicator, IndicatorError, IndicatorResult,
    IndicatorSeries, Latest, MomentumState, Numeric, Rollback, RollingWindow, Series, Signal,
    SignalIndicator, SignalTracker,
};

use crate::momentum::Rsi;
use crate::moving_average::{MovingAverage, Sma, Smoothing};
use crate::statistics::{mean_absolute_deviation, Period};

/// Highest high and lowest low of a candle window.
fn high_low<T: Numeric>(window: &RollingWindow<Candle<T>>) -> Option<(T, T)> {
    let first = window.first()?;
    Some(window.iter().fold((first.high, first.low), |(high, low), candle| {
        (partial_max(high, candle.high), partial_min(low, candle.low))
    }))
}

/// Stochastic Oscillator output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticResult<T> {
    /// Smoothed %K line
    pub k: T,
    /// %D signal line
    pub d: T,
}

/// Stochastic Oscillator by George Lane.
///
/// Locates the close within the high-low range of the last `n` candles:
/// `%K = 100 * (close - lowest) / (highest - lowest)`. The raw value is
/// smoothed over `m` periods (1 keeps it raw) and `%D` smooths `%K` over `p`.
#[derive(Debug, Clone)]
pub struct StochasticOscillator<T> {
    n: usize,
    window: RollingWindow<Candle<T>>,
    k_smoothing: MovingAverage<T>,
    d_smoothing: MovingAverage<T>,
    latest: Latest<StochasticResult<T>>,
}

impl<T: Numeric> StochasticOscillator<T> {
    /// Create a slow stochastic over SMAs, e.g. (14, 3, 3).
    pub fn new(n: usize, m: usize, p: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(n, m, p, Smoothing::Sma)
    }

    pub fn with_smoothing(n: usize, m: usize, p: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        let n = IndicatorError::check_interval("Stochastic %K interval", n)?;
        debug!("Created Stochastic({}, {}, {}) with {:?} smoothing", n, m, p, smoothing);
        Ok(Self {
            n,
            window: RollingWindow::new(n),
            k_smoothing: smoothing.build(m)?,
            d_smoothing: smoothing.build(p)?,
            latest: Latest::new(),
        })
    }
}

impl<T: Numeric> Indicator for StochasticOscillator<T> {
    type Input = Candle<T>;
    type Output = StochasticResult<T>;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<StochasticResult<T>> {
        self.window.update(candle, replace);

        let result = match high_low(&self.window) {
            Some((highest, lowest)) if self.window.is_full() => {
                let mut divisor = highest - lowest;
                if divisor.is_zero() {
                    divisor = T::one();
                }
                let fast_k = (candle.close - lowest) * T::from_int(100) / divisor;
                self.k_smoothing.update(fast_k, replace).and_then(|k| {
                    let d = self.d_smoothing.update(k, replace)?;
                    Some(StochasticResult { k, d })
                })
            }
            _ => None,
        };
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<StochasticResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.d_smoothing.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.n + self.k_smoothing.required_inputs() + self.d_smoothing.required_inputs() - 2
    }

    fn name(&self) -> &str {
        "STOCH"
    }
}

/// Stochastic RSI by Tushar Chande and Stanley Kroll.
///
/// Positions the RSI within its own range over the same interval, scaled to
/// `0..=1`. A flat RSI range yields 100, which is kept out of the %K and %D
/// lines.
#[derive(Debug, Clone)]
pub struct StochasticRsi<T> {
    rsi: Rsi<T>,
    period: Period<T>,
    lines: Rollback<SignalLines<T>>,
    series: Series<T>,
}

/// %K and %D smoothers, snapshotted as a pair so a replace can undo a step
/// that skipped them.
#[derive(Debug, Clone)]
struct SignalLines<T> {
    k: Sma<T>,
    d: Sma<T>,
}

impl<T: Numeric> StochasticRsi<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, Smoothing::Wsma)
    }

    /// Create a Stochastic RSI whose inner RSI uses `smoothing`.
    pub fn with_smoothing(interval: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        Ok(Self {
            rsi: Rsi::with_smoothing(interval, smoothing)?,
            period: Period::new(interval)?,
            lines: Rollback::new(SignalLines {
                k: Sma::new(3)?,
                d: Sma::new(3)?,
            }),
            series: Series::new(),
        })
    }

    /// %K line, a 3-period SMA of the result.
    pub fn k(&self) -> Option<T> {
        self.lines.current().k.result().ok()
    }

    /// %D line, a 3-period SMA of %K.
    pub fn d(&self) -> Option<T> {
        self.lines.current().d.result().ok()
    }
}

impl<T: Numeric> Indicator for StochasticRsi<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        let lines = self.lines.begin(replace);
        let result = self.rsi.update(price, replace).and_then(|rsi| {
            let range = self.period.update(rsi, replace)?;
            let spread = range.highest - range.lowest;
            if spread.is_zero() {
                return Some(T::from_int(100));
            }
            let stoch_rsi = (rsi - range.lowest) / spread;
            if let Some(k) = lines.k.add(stoch_rsi) {
                lines.d.add(k);
            }
            Some(stoch_rsi)
        });
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.period.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.rsi.required_inputs() + self.period.required_inputs() - 1
    }

    fn name(&self) -> &str {
        "STOCHRSI"
    }
}

/// Commodity Channel Index (CCI) by Donald Lambert.
///
/// Distance of the typical price from its SMA, in units of
/// `0.015 * mean absolute deviation`.
#[derive(Debug, Clone)]
pub struct Cci<T> {
    window: RollingWindow<T>,
    sma: Sma<T>,
    series: Series<T>,
}

impl<T: Numeric> Cci<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("CCI interval", interval)?;
        Ok(Self {
            window: RollingWindow::new(interval),
            sma: Sma::new(interval)?,
            series: Series::new(),
        })
    }
}

impl<T: Numeric> Indicator for Cci<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let typical = candle.typical();
        self.window.update(typical, replace);

        let result = self.sma.update(typical, replace).and_then(|mean| {
            let deviation = mean_absolute_deviation(self.window.iter(), Some(mean))?;
            let mut divisor = T::ratio(15, 1000) * deviation;
            if divisor.is_zero() {
                divisor = T::one();
            }
            Some((typical - mean) / divisor)
        });
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.sma.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.sma.required_inputs()
    }

    fn name(&self) -> &str {
        "CCI"
    }
}

/// Williams %R.
///
/// `-100 * (highest - close) / (highest - lowest)` over the last N candles,
/// ranging from -100 (close at the low) to 0 (close at the high). Readings at
/// or above -20 signal overbought, at or below -80 oversold.
#[derive(Debug, Clone)]
pub struct WilliamsR<T> {
    window: RollingWindow<Candle<T>>,
    series: Series<T>,
    momentum: SignalTracker<MomentumState>,
}

impl<T: Numeric> WilliamsR<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("Williams %R interval", interval)?;
        Ok(Self {
            window: RollingWindow::new(interval),
            series: Series::new(),
            momentum: SignalTracker::new(),
        })
    }
}

impl<T: Numeric> Indicator for WilliamsR<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        self.window.update(candle, replace);

        let hundred = T::from_int(100);
        let result = match high_low(&self.window) {
            Some((highest, lowest)) if self.window.is_full() => {
                let range = highest - lowest;
                if range.is_zero() {
                    Some(-hundred)
                } else {
                    Some(-hundred * (highest - candle.close) / range)
                }
            }
            _ => None,
        };
        let state = result.map(|result| {
            if result >= T::from_int(-20) {
                MomentumState::Overbought
            } else if result <= T::from_int(-80) {
                MomentumState::Oversold
            } else {
                MomentumState::Neutral
            }
        });
        self.momentum.record(state, replace);
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.window.is_full()
    }

    fn required_inputs(&self) -> usize {
        self.window.capacity()
    }

    fn name(&self) -> &str {
        "WILLR"
    }
}

impl<T: Numeric> SignalIndicator for WilliamsR<T> {
    type State = MomentumState;

    fn signal(&self) -> Signal<MomentumState> {
        self.momentum.signal()
    }
}

/// Range Expansion Index (REI) by Thomas DeMark.
///
/// Sums the two-bar changes of highs and lows over the last `interval`
/// candles and scales them by the summed absolute changes, giving a value in
/// `-100..=100`. A bar counts only while price still trades beyond the closes
/// seven and eight bars back:
///
/// - a bar is dropped when its high two bars back sits below both of those
///   closes and its own high sits below the highs five and six bars back
/// - likewise with lows above both closes and above the lows five and six
///   bars back
///
/// A window without any change yields 0.
#[derive(Debug, Clone)]
pub struct Rei<T> {
    interval: usize,
    window: RollingWindow<Candle<T>>,
    series: Series<T>,
}

/// Bars of history each summed bar looks back on.
const REI_LOOKBACK: usize = 8;

impl<T: Numeric> Rei<T> {
    /// Create an REI, usually over 8 candles.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("REI interval", interval)?;
        Ok(Self {
            interval,
            window: RollingWindow::new(interval + REI_LOOKBACK),
            series: Series::new(),
        })
    }

    fn expansion(&self) -> Option<T> {
        let bars: Vec<Candle<T>> = self.window.iter().collect();
        let mut sum = T::zero();
        let mut absolute = T::zero();

        for j in REI_LOOKBACK..bars.len() {
            let high_change = bars[j].high.checked_sub(bars[j - 2].high)?;
            let low_change = bars[j].low.checked_sub(bars[j - 2].low)?;

            let stalled_high = bars[j - 2].high < bars[j - 7].close
                && bars[j - 2].high < bars[j - 8].close
                && bars[j].high < bars[j - 5].high
                && bars[j].high < bars[j - 6].high;
            let stalled_low = bars[j - 2].low > bars[j - 7].close
                && bars[j - 2].low > bars[j - 8].close
                && bars[j].low > bars[j - 5].low
                && bars[j].low > bars[j - 6].low;

            if !stalled_high && !stalled_low {
                sum = sum.checked_add(high_change.checked_add(low_change)?)?;
            }
            absolute = absolute.checked_add(high_change.abs().checked_add(low_change.abs())?)?;
        }

        if absolute.is_zero() {
            return Some(T::zero());
        }
        sum.checked_div(absolute)?.checked_mul(T::from_int(100))
    }
}

impl<T: Numeric> Indicator for Rei<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        self.window.update(candle, replace);
        let result = if self.window.is_full() {
            self.expansion()
        } else {
            None
        };
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.window.is_full()
    }

    fn required_inputs(&self) -> usize {
        self.interval + REI_LOOKBACK
    }

    fn name(&self) -> &str {
        "REI"
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

impl_series!(StochasticRsi, Cci, WilliamsR, Rei);
