//! Momentum indicators.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    Candle, Indicator, IndicatorError, IndicatorResult, IndicatorSeries, Latest, Numeric,
    Rollback, RollingWindow, Series, Signal, SignalIndicator, SignalTracker, TrendState,
};

use crate::moving_average::{MovingAverage, Sma, Smoothing};
use crate::signals::{by_sign, versus_previous};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi<T> {
    interval: usize,
    previous: Rollback<Option<T>>,
    avg_gain: MovingAverage<T>,
    avg_loss: MovingAverage<T>,
    series: Series<T>,
}

impl<T: Numeric> Rsi<T> {
    /// Create a new RSI using Wilder's smoothing.
    ///
    /// Common intervals are 14 (default) or 9.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, Smoothing::Wsma)
    }

    /// Create an RSI that averages gains and losses with `smoothing`.
    pub fn with_smoothing(interval: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("RSI interval", interval)?;
        Ok(Self {
            interval,
            previous: Rollback::new(None),
            avg_gain: smoothing.build(interval)?,
            avg_loss: smoothing.build(interval)?,
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl<T: Numeric> Indicator for Rsi<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        let previous = self.previous.begin(replace);
        let Some(prev) = previous.replace(price) else {
            return self.series.record(None, replace);
        };

        let Some(change) = price.checked_sub(prev) else {
            return self.series.record(None, replace);
        };
        let (gain, loss) = if change > T::zero() {
            (change, T::zero())
        } else {
            (T::zero(), -change)
        };

        let avg_gain = self.avg_gain.update(gain, replace);
        let avg_loss = self.avg_loss.update(loss, replace);

        let result = match (avg_gain, avg_loss) {
            (Some(_), Some(loss)) if loss.is_zero() => Some(T::from_int(100)),
            // 100 - 100 / (1 + gain / loss), kept bounded for tiny losses
            (Some(gain), Some(loss)) => gain
                .checked_add(loss)
                .and_then(|total| gain.checked_div(total))
                .map(|share| share * T::from_int(100)),
            _ => None,
        };
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.avg_gain.is_stable() && self.avg_loss.is_stable()
    }

    fn required_inputs(&self) -> usize {
        // One extra price to form the first change
        self.avg_gain.required_inputs() + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// Difference or ratio against the price `interval` steps back.
#[derive(Debug, Clone)]
struct Lagged<T> {
    interval: usize,
    window: RollingWindow<T>,
    series: Series<T>,
    trend: SignalTracker<TrendState>,
}

impl<T: Numeric> Lagged<T> {
    fn new(name: &str, interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval(name, interval)?;
        Ok(Self {
            interval,
            window: RollingWindow::new(interval + 1),
            series: Series::new(),
            trend: SignalTracker::new(),
        })
    }

    fn update(
        &mut self,
        price: T,
        replace: bool,
        f: impl FnOnce(T, T) -> Option<T>,
        classify: impl FnOnce(T, Option<T>) -> TrendState,
    ) -> Option<T> {
        self.window.update(price, replace);
        let result = match self.window.first() {
            Some(base) if self.window.is_full() => f(price, base),
            _ => None,
        };
        self.series.record(result, replace);
        let previous = self.series.previous();
        self.trend
            .record(result.map(|result| classify(result, previous)), replace);
        result
    }
}

/// Momentum (MOM).
///
/// Difference between the current price and the price N steps ago. The
/// signal is bullish while momentum rises against the previous result.
#[derive(Debug, Clone)]
pub struct Mom<T>(Lagged<T>);

impl<T: Numeric> Mom<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Ok(Self(Lagged::new("MOM interval", interval)?))
    }
}

/// Rate of Change (ROC).
///
/// Relative change against the price N steps ago. A zero base price yields 0.
/// The signal is bearish below zero and bullish otherwise.
#[derive(Debug, Clone)]
pub struct Roc<T>(Lagged<T>);

impl<T: Numeric> Roc<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        Ok(Self(Lagged::new("ROC interval", interval)?))
    }
}

macro_rules! impl_lagged {
    (
        $ty:ident,
        $name:literal,
        |$price:ident, $base:ident| $body:expr,
        |$result:ident, $previous:ident| $classify:expr
    ) => {
        impl<T: Numeric> Indicator for $ty<T> {
            type Input = T;
            type Output = T;

            fn update(&mut self, price: T, replace: bool) -> Option<T> {
                self.0.update(
                    price,
                    replace,
                    |$price, $base| $body,
                    |$result, $previous| $classify,
                )
            }

            fn result(&self) -> IndicatorResult<T> {
                self.0.series.result(self.required_inputs())
            }

            fn is_stable(&self) -> bool {
                self.0.window.is_full()
            }

            fn required_inputs(&self) -> usize {
                self.0.interval + 1
            }

            fn name(&self) -> &str {
                $name
            }
        }

        impl<T: Numeric> IndicatorSeries for $ty<T> {
            fn highest(&self) -> Option<T> {
                self.0.series.highest()
            }

            fn lowest(&self) -> Option<T> {
                self.0.series.lowest()
            }
        }

        impl<T: Numeric> SignalIndicator for $ty<T> {
            type State = TrendState;

            fn signal(&self) -> Signal<TrendState> {
                self.0.trend.signal()
            }
        }
    };
}

impl_lagged!(
    Mom,
    "MOM",
    |price, base| price.checked_sub(base),
    |result, previous| versus_previous(result, previous)
);
impl_lagged!(
    Roc,
    "ROC",
    |price, base| if base.is_zero() {
        Some(T::zero())
    } else {
        price.checked_sub(base)?.checked_div(base)
    },
    |result, _previous| if result < T::zero() {
        TrendState::Bearish
    } else {
        TrendState::Bullish
    }
);

/// Center of Gravity (CG) oscillator by John Ehlers.
///
/// Weighted position of the prices in the window, paired with an SMA signal line.
#[derive(Debug, Clone)]
pub struct Cg<T> {
    window: RollingWindow<T>,
    signal: Sma<T>,
    series: Series<T>,
}

impl<T: Numeric> Cg<T> {
    pub fn new(interval: usize, signal_interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("CG interval", interval)?;
        Ok(Self {
            window: RollingWindow::new(interval),
            signal: Sma::new(signal_interval)?,
            series: Series::new(),
        })
    }

    /// Signal line value.
    pub fn signal(&self) -> Option<T> {
        self.signal.result().ok()
    }

    /// Prices currently inside the window, oldest first.
    pub fn prices(&self) -> impl Iterator<Item = T> + '_ {
        self.window.iter()
    }
}

impl<T: Numeric> Indicator for Cg<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        self.window.update(price, replace);

        let sums = self.window.iter().enumerate().try_fold(
            (T::zero(), T::zero()),
            |(num, den), (i, price)| {
                let weighted = price.checked_mul(T::from_count(i + 1))?;
                Some((num.checked_add(weighted)?, den.checked_add(price)?))
            },
        );
        let cg = match sums {
            Some((numerator, denominator)) if denominator > T::zero() => {
                numerator.checked_div(denominator)
            }
            Some(_) => Some(T::zero()),
            None => None,
        };

        // An overflowing window feeds nothing to the signal line
        let result = match cg {
            Some(cg) => {
                self.signal.update(cg, replace);
                self.signal.is_stable().then_some(cg)
            }
            None => None,
        };
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.signal.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.signal.required_inputs()
    }

    fn name(&self) -> &str {
        "CG"
    }
}

/// Awesome Oscillator (AO) by Bill Williams.
///
/// Short minus long moving average of the median price. The signal follows
/// the sign of the result.
#[derive(Debug, Clone)]
pub struct Ao<T> {
    short: MovingAverage<T>,
    long: MovingAverage<T>,
    series: Series<T>,
    trend: SignalTracker<TrendState>,
}

impl<T: Numeric> Ao<T> {
    /// Create an AO over SMAs, usually 5 and 34.
    pub fn new(short: usize, long: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(short, long, Smoothing::Sma)
    }

    pub fn with_smoothing(short: usize, long: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        if short >= long {
            return Err(IndicatorError::InvalidParameter(format!(
                "AO short interval ({short}) must be less than long interval ({long})"
            )));
        }
        Ok(Self {
            short: smoothing.build(short)?,
            long: smoothing.build(long)?,
            series: Series::new(),
            trend: SignalTracker::new(),
        })
    }
}

impl<T: Numeric> Indicator for Ao<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let median = candle.median();
        let short = self.short.update(median, replace);
        let long = self.long.update(median, replace);

        let result = match (short, long) {
            (Some(short), Some(long)) => short.checked_sub(long),
            _ => None,
        };
        self.trend.record(result.map(by_sign), replace);
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.short.is_stable() && self.long.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.long.required_inputs()
    }

    fn name(&self) -> &str {
        "AO"
    }
}

/// Accelerator Oscillator (AC) by Bill Williams.
///
/// AO minus its SMA signal line. The one-step momentum of the result is
/// tracked alongside. The trend signal is bullish above zero and bearish
/// otherwise.
#[derive(Debug, Clone)]
pub struct Ac<T> {
    ao: Ao<T>,
    signal: Sma<T>,
    momentum: Mom<T>,
    series: Series<T>,
    trend: SignalTracker<TrendState>,
}

impl<T: Numeric> Ac<T> {
    pub fn new(short: usize, long: usize, signal_interval: usize) -> IndicatorResult<Self> {
        Ok(Self {
            ao: Ao::new(short, long)?,
            signal: Sma::new(signal_interval)?,
            momentum: Mom::new(1)?,
            series: Series::new(),
            trend: SignalTracker::new(),
        })
    }

    /// Change of AC against the previous step.
    pub fn momentum(&self) -> Option<T> {
        self.momentum.result().ok()
    }
}

impl<T: Numeric> Indicator for Ac<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let result = self.ao.update(candle, replace).and_then(|ao| {
            let signal = self.signal.update(ao, replace)?;
            let ac = ao.checked_sub(signal)?;
            self.momentum.update(ac, replace);
            Some(ac)
        });
        let state = result.map(|ac| {
            if ac > T::zero() {
                TrendState::Bullish
            } else {
                TrendState::Bearish
            }
        });
        self.trend.record(state, replace);
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.signal.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.ao.required_inputs() + self.signal.required_inputs() - 1
    }

    fn name(&self) -> &str {
        "AC"
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

impl_series!(Rsi, Cg, Ao, Ac);

macro_rules! impl_trend_signal {
    ($($ty:ident),*) => {
        $(
            impl<T: Numeric> SignalIndicator for $ty<T> {
                type State = TrendState;

                fn signal(&self) -> Signal<TrendState> {
                    self.trend.signal()
                }
            }
        )*
    };
}

impl_trend_signal!(Ao, Ac, Macd);

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdResult<T> {
    /// MACD line (short MA - long MA)
    pub macd: T,
    /// Signal line (MA of MACD), zero until it is stable
    pub signal: T,
    /// Histogram (MACD - Signal)
    pub histogram: T,
}

/// MACD indicator.
///
/// Uses two moving averages to identify trend direction and momentum. The
/// trend signal is bullish while the histogram is positive.
#[derive(Debug, Clone)]
pub struct Macd<T> {
    short: MovingAverage<T>,
    long: MovingAverage<T>,
    signal: MovingAverage<T>,
    latest: Latest<MacdResult<T>>,
    trend: SignalTracker<TrendState>,
}

impl<T: Numeric> Macd<T> {
    /// Create a MACD over EMAs, usually (12, 26, 9).
    pub fn new(short: usize, long: usize, signal: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(short, long, signal, Smoothing::Ema)
    }

    /// Create a MACD with custom intervals and smoothing.
    pub fn with_smoothing(
        short: usize,
        long: usize,
        signal: usize,
        smoothing: Smoothing,
    ) -> IndicatorResult<Self> {
        if short >= long {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD short interval ({short}) must be less than long interval ({long})"
            )));
        }
        debug!("Created MACD({}, {}, {}) with {:?} smoothing", short, long, signal, smoothing);
        Ok(Self {
            short: smoothing.build(short)?,
            long: smoothing.build(long)?,
            signal: smoothing.build(signal)?,
            latest: Latest::new(),
            trend: SignalTracker::new(),
        })
    }

    /// Whether the signal line has warmed up as well.
    pub fn is_signal_stable(&self) -> bool {
        self.signal.is_stable()
    }
}

impl<T: Numeric> Indicator for Macd<T> {
    type Input = T;
    type Output = MacdResult<T>;

    fn update(&mut self, price: T, replace: bool) -> Option<MacdResult<T>> {
        let short = self.short.update(price, replace);
        let long = self.long.update(price, replace);

        let result = match (short, long) {
            (Some(short), Some(long)) => short.checked_sub(long).and_then(|macd| {
                let signal = self.signal.update(macd, replace).unwrap_or_else(T::zero);
                Some(MacdResult {
                    macd,
                    signal,
                    histogram: macd.checked_sub(signal)?,
                })
            }),
            _ => None,
        };
        let state = result.map(|result| {
            if result.histogram > T::zero() {
                TrendState::Bullish
            } else {
                TrendState::Bearish
            }
        });
        self.trend.record(state, replace);
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<MacdResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.long.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.long.required_inputs()
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PRICES: [f64; 15] = [
        81.59, 81.06, 82.87, 83.0, 83.61, 83.15, 82.84, 83.99, 84.55, 84.36, 85.53, 86.54, 86.89,
        87.77, 87.29,
    ];

    #[test]
    fn test_rsi() {
        // Test data verified with:
        // https://tulipindicators.org/rsi
        let expected = [
            72.034, 64.927, 75.936, 79.796, 74.713, 83.033, 87.478, 88.755, 91.483, 78.498,
        ];
        let mut rsi = Rsi::new(5).unwrap();
        let results: Vec<f64> = rsi.update_all(PRICES).into_iter().flatten().collect();

        assert_eq!(results.len(), expected.len());
        for (actual, expected) in results.iter().zip(expected) {
            assert!((actual - expected).abs() < 0.0005, "{actual} != {expected}");
        }
        assert_eq!(rsi.required_inputs(), 6);
        assert!((rsi.highest().unwrap() - 91.483).abs() < 0.0005);
        assert!((rsi.lowest().unwrap() - 64.927).abs() < 0.0005);
    }

    #[test]
    fn test_rsi_replace() {
        let mut rsi = Rsi::new(5).unwrap();
        rsi.update_all(PRICES[..7].iter().copied());

        rsi.add(90.0);
        let replaced = rsi.replace(83.99).unwrap();
        assert!((replaced - 75.936).abs() < 0.0005);
    }

    #[test]
    fn test_rsi_without_losses() {
        let mut rsi = Rsi::new(3).unwrap();
        let result = rsi.update_all([dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)]);

        assert_eq!(result[4], Some(dec!(100)));
    }

    #[test]
    fn test_mom() {
        let expected = [1.56, 1.78, 1.12, 1.55, 0.75, 2.38, 3.7, 2.9, 3.22, 2.93];
        let mut mom = Mom::new(5).unwrap();
        let results: Vec<f64> = mom.update_all(PRICES).into_iter().flatten().collect();

        for (actual, expected) in results.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9);
        }
        assert_eq!(mom.required_inputs(), 6);
        assert!((mom.lowest().unwrap() - 0.75).abs() < 1e-9);
        assert!((mom.highest().unwrap() - 3.7).abs() < 1e-9);
    }

    #[test]
    fn test_roc() {
        let mut roc = Roc::new(5).unwrap();
        let results = roc.update_all(PRICES);

        assert!(results[4].is_none());
        assert!((results[5].unwrap() - 0.01911999019).abs() < 1e-9);
        assert!((results[14].unwrap() - 0.03473210052).abs() < 1e-9);
    }

    #[test]
    fn test_roc_zero_base() {
        let mut roc = Roc::new(1).unwrap();
        roc.update_all([dec!(0), dec!(5)]);

        assert_eq!(roc.result(), Ok(dec!(0)));
    }

    #[test]
    fn test_cg() {
        let mut cg = Cg::new(5, 10).unwrap();
        cg.update_all([100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0, 200.0]);
        assert!(cg.result().unwrap() > cg.signal().unwrap());

        cg.update_all([150.0, 110.0, 90.0, 130.0]);
        let result = cg.result().unwrap();
        assert!(result < cg.signal().unwrap());
        assert!((result - 2.7059).abs() < 0.00005);
        assert!((cg.lowest().unwrap() - 2.6081).abs() < 0.00005);
        assert!((cg.highest().unwrap() - 3.1176).abs() < 0.00005);
        assert_eq!(cg.prices().count(), 5);
    }

    #[test]
    fn test_cg_zero_prices() {
        let mut cg = Cg::new(1, 1).unwrap();
        assert_eq!(cg.add(dec!(0)), Some(dec!(0)));
    }

    #[test]
    fn test_ao_rejects_inverted_intervals() {
        assert!(Ao::<f64>::new(34, 5).is_err());
        assert!(Ac::<f64>::new(5, 5, 5).is_err());
    }

    #[test]
    fn test_macd_stability() {
        let mut macd = Macd::new(9, 18, 9).unwrap();
        let prices = [
            dec!(0.00019040), dec!(0.00019071), dec!(0.00019198), dec!(0.00019220),
            dec!(0.00019214), dec!(0.00019205), dec!(0.00019214), dec!(0.00019222),
            dec!(0.00019144), dec!(0.00019128), dec!(0.00019159), dec!(0.00019143),
            dec!(0.00019199), dec!(0.00019214), dec!(0.00019119), dec!(0.00019202),
            dec!(0.00019220), dec!(0.00019207),
        ];

        assert!(!macd.is_stable());
        assert!(macd.result().is_err());
        macd.update_all(prices);
        assert!(macd.is_stable());
        assert!(!macd.is_signal_stable());

        let result = macd.result().unwrap();
        assert_eq!(result.histogram, result.macd - result.signal);
    }

    #[test]
    fn test_macd_rejects_inverted_intervals() {
        assert!(Macd::<f64>::new(26, 12, 9).is_err());
        assert!(Macd::<f64>::new(12, 12, 9).is_err());
    }

    #[test]
    fn test_macd_signal_lags() {
        let mut macd = Macd::with_smoothing(2, 3, 2, Smoothing::Sma).unwrap();
        let results = macd.update_all([1.0, 2.0, 3.0, 4.0, 6.0]);

        assert!(results[1].is_none());
        // SMA2 = 2.5, SMA3 = 2.0, no signal yet
        let first = results[2].unwrap();
        assert!((first.macd - 0.5).abs() < 1e-10);
        assert_eq!(first.signal, 0.0);
        assert!((first.histogram - 0.5).abs() < 1e-10);

        // SMA2 = 5.0, SMA3 = 4.333, signal averages the last two MACD values
        let last = results[4].unwrap();
        assert!((last.macd - 2.0 / 3.0).abs() < 1e-10);
        assert!((last.signal - (0.5 + 2.0 / 3.0) / 2.0).abs() < 1e-10);
    }

    fn flat(price: f64) -> Candle<f64> {
        Candle::hlc(price, price, price)
    }

    #[test]
    fn test_mom_signal_follows_previous_result() {
        let mut mom = Mom::new(1).unwrap();
        assert_eq!(mom.signal().state, TrendState::Unknown);

        // Momentum 2, 1, 2, 2
        mom.update_all([1.0, 3.0, 4.0, 6.0]);
        assert_eq!(
            mom.signal(),
            Signal {
                state: TrendState::Bullish,
                has_changed: true
            }
        );

        mom.add(8.0);
        assert_eq!(
            mom.signal(),
            Signal {
                state: TrendState::Sideways,
                has_changed: true
            }
        );

        mom.replace(9.0);
        assert_eq!(
            mom.signal(),
            Signal {
                state: TrendState::Bullish,
                has_changed: false
            }
        );
    }

    #[test]
    fn test_roc_signal() {
        let mut roc = Roc::new(1).unwrap();
        roc.update_all([2.0, 1.0]);
        assert_eq!(roc.signal().state, TrendState::Bearish);

        roc.add(1.5);
        assert_eq!(
            roc.signal(),
            Signal {
                state: TrendState::Bullish,
                has_changed: true
            }
        );

        roc.replace(0.5);
        assert_eq!(
            roc.signal(),
            Signal {
                state: TrendState::Bearish,
                has_changed: false
            }
        );
    }

    #[test]
    fn test_ao_signal() {
        let mut ao = Ao::new(1, 2).unwrap();
        // AO 0.5, 1, -0.5
        ao.update_all([flat(1.0), flat(2.0), flat(4.0)]);
        assert_eq!(
            ao.signal(),
            Signal {
                state: TrendState::Bullish,
                has_changed: false
            }
        );

        ao.add(flat(3.0));
        assert_eq!(
            ao.signal(),
            Signal {
                state: TrendState::Bearish,
                has_changed: true
            }
        );

        ao.replace(flat(4.0));
        assert_eq!(ao.signal().state, TrendState::Sideways);
    }

    #[test]
    fn test_ac_signal() {
        let mut ac = Ac::new(1, 2, 2).unwrap();
        // AC 0.25, -0.75, 0.75
        ac.update_all([flat(1.0), flat(2.0), flat(4.0)]);
        assert_eq!(ac.signal().state, TrendState::Bullish);

        ac.add(flat(3.0));
        assert_eq!(ac.signal().state, TrendState::Bearish);
        assert!(ac.signal().has_changed);

        ac.add(flat(5.0));
        assert!((ac.result().unwrap() - 0.75).abs() < 1e-10);
        assert_eq!(ac.signal().state, TrendState::Bullish);
    }

    #[test]
    fn test_macd_signal_uses_histogram() {
        let mut macd = Macd::with_smoothing(2, 3, 2, Smoothing::Sma).unwrap();
        macd.update_all([dec!(1), dec!(2), dec!(3)]);
        assert_eq!(macd.signal().state, TrendState::Bullish);

        // MACD 0.5 twice, so the histogram drops to zero
        macd.add(dec!(4));
        assert_eq!(macd.result().unwrap().histogram, dec!(0));
        assert_eq!(
            macd.signal(),
            Signal {
                state: TrendState::Bearish,
                has_changed: true
            }
        );

        macd.add(dec!(6));
        assert_eq!(macd.signal().state, TrendState::Bullish);
    }
}
