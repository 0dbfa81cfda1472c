//! Moving average indicators.
//!
//! The averages double as the smoothing building blocks of the composite
//! indicators. [`Smoothing`] selects one of them at construction time and
//! [`MovingAverage`] dispatches to it without dynamic dispatch.

use serde::{Deserialize, Serialize};
use trading_core::{
    checked_sum, Indicator, IndicatorError, IndicatorResult, IndicatorSeries, Numeric, Rollback,
    RollingWindow, Series,
};

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values with a running sum.
/// A replace restarts from the sum saved before the amended step, so the
/// result matches a feed that never saw the replaced value.
#[derive(Debug, Clone)]
pub struct Sma<T> {
    interval: usize,
    window: RollingWindow<T>,
    /// Running window sum, None after an overflow until it can be rebuilt.
    sum: Rollback<Option<T>>,
    /// Value pushed out of the window by the latest non-replacing update.
    evicted: T,
    series: Series<T>,
}

impl<T: Numeric> Sma<T> {
    /// Create a new SMA with the specified interval.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("SMA interval", interval)?;
        Ok(Self {
            interval,
            window: RollingWindow::new(interval),
            sum: Rollback::new(Some(T::zero())),
            evicted: T::zero(),
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Prices currently inside the window, oldest first.
    pub fn prices(&self) -> impl Iterator<Item = T> + '_ {
        self.window.iter()
    }
}

impl<T: Numeric> Indicator for Sma<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        let dropped = self.window.update(price, replace);
        if !replace {
            self.evicted = dropped.unwrap_or_else(T::zero);
        }

        let evicted = self.evicted;
        let window = &self.window;
        let sum = self.sum.begin(replace);
        *sum = (*sum)
            .and_then(|sum| sum.checked_add(price))
            .and_then(|sum| sum.checked_sub(evicted))
            .or_else(|| checked_sum(window.iter()));

        let result = if self.window.is_full() {
            self.sum
                .current()
                .and_then(|sum| sum.checked_div(T::from_count(self.interval)))
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
        self.interval
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EmaState<T> {
    result: Option<T>,
    count: usize,
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay with
/// `w = 2 / (interval + 1)`, seeded by the first price. It keeps no window,
/// so stability is counted separately.
#[derive(Debug, Clone)]
pub struct Ema<T> {
    interval: usize,
    weight: T,
    state: Rollback<EmaState<T>>,
    series: Series<T>,
}

impl<T: Numeric> Ema<T> {
    /// Create a new EMA with the specified interval.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("EMA interval", interval)?;
        Ok(Self::weighted(interval, T::ratio(2, interval as i64 + 1)))
    }

    fn weighted(interval: usize, weight: T) -> Self {
        Self {
            interval,
            weight,
            state: Rollback::new(EmaState {
                result: None,
                count: 0,
            }),
            series: Series::new(),
        }
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Running value, available from the first update on.
    pub(crate) fn raw(&self) -> Option<T> {
        self.state.current().result
    }
}

impl<T: Numeric> Indicator for Ema<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        let weight = self.weight;
        let state = self.state.begin(replace);
        state.count += 1;
        let value = match state.result {
            Some(prev) => price * weight + prev * (T::one() - weight),
            None => price,
        };
        state.result = Some(value);

        let result = (state.count >= self.interval).then_some(value);
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.state.current().count >= self.interval
    }

    fn required_inputs(&self) -> usize {
        self.interval
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Relative Moving Average (RMA).
///
/// An exponential average with `w = 1 / interval`. Unlike [`Wsma`] it is
/// seeded by the first price, so it reacts from the first update on.
#[derive(Debug, Clone)]
pub struct Rma<T> {
    ema: Ema<T>,
}

impl<T: Numeric> Rma<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("RMA interval", interval)?;
        Ok(Self {
            ema: Ema::weighted(interval, T::ratio(1, interval as i64)),
        })
    }

    pub fn interval(&self) -> usize {
        self.ema.interval()
    }
}

impl<T: Numeric> Indicator for Rma<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        self.ema.update(price, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.ema.result()
    }

    fn is_stable(&self) -> bool {
        self.ema.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.ema.required_inputs()
    }

    fn name(&self) -> &str {
        "RMA"
    }
}

impl<T: Numeric> IndicatorSeries for Rma<T> {
    fn highest(&self) -> Option<T> {
        self.ema.highest()
    }

    fn lowest(&self) -> Option<T> {
        self.ema.lowest()
    }
}

/// Wilder's Smoothed Moving Average (WSMA).
///
/// Seeded by an SMA once its window fills, then
/// `result = previous + (price - previous) / interval`.
#[derive(Debug, Clone)]
pub struct Wsma<T> {
    interval: usize,
    sma: Sma<T>,
    state: Rollback<Option<T>>,
    series: Series<T>,
}

/// Smoothed Moving Average, another name for [`Wsma`].
pub type Smma<T> = Wsma<T>;

impl<T: Numeric> Wsma<T> {
    /// Create a new WSMA with the specified interval.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("WSMA interval", interval)?;
        Ok(Self {
            interval,
            sma: Sma::new(interval)?,
            state: Rollback::new(None),
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl<T: Numeric> Indicator for Wsma<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        let seed = self.sma.update(price, replace);
        let interval = T::from_count(self.interval);

        let state = self.state.begin(replace);
        *state = match *state {
            Some(prev) => Some(prev + (price - prev) / interval),
            None => seed,
        };

        let result = *state;
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.state.current().is_some()
    }

    fn required_inputs(&self) -> usize {
        self.interval
    }

    fn name(&self) -> &str {
        "WSMA"
    }
}

/// Weighted Moving Average (WMA).
///
/// Gives linearly increasing weights `1..=interval` to newer prices.
#[derive(Debug, Clone)]
pub struct Wma<T> {
    interval: usize,
    window: RollingWindow<T>,
    weights_sum: T,
    series: Series<T>,
}

impl<T: Numeric> Wma<T> {
    /// Create a new WMA with the specified interval.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("WMA interval", interval)?;
        // Sum of weights: 1 + 2 + ... + n = n(n+1)/2
        let weights_sum = T::from_count(interval * (interval + 1) / 2);
        Ok(Self {
            interval,
            window: RollingWindow::new(interval),
            weights_sum,
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl<T: Numeric> Indicator for Wma<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        self.window.update(price, replace);

        let result = if self.window.is_full() {
            self.window
                .iter()
                .enumerate()
                .try_fold(T::zero(), |total, (i, price)| {
                    total.checked_add(price.checked_mul(T::from_count(i + 1))?)
                })
                .and_then(|weighted| weighted.checked_div(self.weights_sum))
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
        self.interval
    }

    fn name(&self) -> &str {
        "WMA"
    }
}

/// Double Exponential Moving Average (DEMA).
///
/// `2 * EMA(price) - EMA(EMA(price))`, reducing the lag of a single EMA.
#[derive(Debug, Clone)]
pub struct Dema<T> {
    inner: Ema<T>,
    outer: Ema<T>,
    series: Series<T>,
}

impl<T: Numeric> Dema<T> {
    /// Create a new DEMA with the specified interval.
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("DEMA interval", interval)?;
        Ok(Self {
            inner: Ema::new(interval)?,
            outer: Ema::new(interval)?,
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.inner.interval()
    }
}

impl<T: Numeric> Indicator for Dema<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        self.inner.update(price, replace);
        let inner = self.inner.raw().unwrap_or(price);
        self.outer.update(inner, replace);

        let result = match (self.outer.is_stable(), self.outer.raw()) {
            (true, Some(outer)) => Some(inner * T::from_int(2) - outer),
            _ => None,
        };
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.outer.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.outer.required_inputs()
    }

    fn name(&self) -> &str {
        "DEMA"
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

impl_series!(Sma, Ema, Wsma, Wma, Dema);

/// Smoothing algorithm used inside composite indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    #[default]
    Sma,
    Ema,
    #[serde(alias = "smma")]
    Wsma,
    Wma,
    Dema,
    Rma,
}

impl Smoothing {
    /// Construct the selected moving average.
    pub fn build<T: Numeric>(self, interval: usize) -> IndicatorResult<MovingAverage<T>> {
        Ok(match self {
            Smoothing::Sma => MovingAverage::Sma(Sma::new(interval)?),
            Smoothing::Ema => MovingAverage::Ema(Ema::new(interval)?),
            Smoothing::Wsma => MovingAverage::Wsma(Wsma::new(interval)?),
            Smoothing::Wma => MovingAverage::Wma(Wma::new(interval)?),
            Smoothing::Dema => MovingAverage::Dema(Dema::new(interval)?),
            Smoothing::Rma => MovingAverage::Rma(Rma::new(interval)?),
        })
    }
}

/// A moving average chosen at runtime from [`Smoothing`].
#[derive(Debug, Clone)]
pub enum MovingAverage<T> {
    Sma(Sma<T>),
    Ema(Ema<T>),
    Wsma(Wsma<T>),
    Wma(Wma<T>),
    Dema(Dema<T>),
    Rma(Rma<T>),
}

macro_rules! dispatch {
    ($self:ident, $ma:ident => $body:expr) => {
        match $self {
            MovingAverage::Sma($ma) => $body,
            MovingAverage::Ema($ma) => $body,
            MovingAverage::Wsma($ma) => $body,
            MovingAverage::Wma($ma) => $body,
            MovingAverage::Dema($ma) => $body,
            MovingAverage::Rma($ma) => $body,
        }
    };
}

impl<T: Numeric> MovingAverage<T> {
    pub fn smoothing(&self) -> Smoothing {
        match self {
            MovingAverage::Sma(_) => Smoothing::Sma,
            MovingAverage::Ema(_) => Smoothing::Ema,
            MovingAverage::Wsma(_) => Smoothing::Wsma,
            MovingAverage::Wma(_) => Smoothing::Wma,
            MovingAverage::Dema(_) => Smoothing::Dema,
            MovingAverage::Rma(_) => Smoothing::Rma,
        }
    }

    /// Latest value, or None before stability.
    pub fn value(&self) -> Option<T> {
        self.result().ok()
    }
}

impl<T: Numeric> Indicator for MovingAverage<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        dispatch!(self, ma => ma.update(price, replace))
    }

    fn result(&self) -> IndicatorResult<T> {
        dispatch!(self, ma => ma.result())
    }

    fn is_stable(&self) -> bool {
        dispatch!(self, ma => ma.is_stable())
    }

    fn required_inputs(&self) -> usize {
        dispatch!(self, ma => ma.required_inputs())
    }

    fn name(&self) -> &str {
        dispatch!(self, ma => ma.name())
    }
}

impl<T: Numeric> IndicatorSeries for MovingAverage<T> {
    fn highest(&self) -> Option<T> {
        dispatch!(self, ma => ma.highest())
    }

    fn lowest(&self) -> Option<T> {
        dispatch!(self, ma => ma.lowest())
    }
}
