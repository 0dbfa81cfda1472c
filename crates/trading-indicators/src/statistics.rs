//! Windowed statistics: rolling extremes, dispersion and quartile spread.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use trading_core::{
    checked_sum, partial_max, partial_min, Indicator, IndicatorError, IndicatorResult,
    IndicatorSeries, Latest, Numeric, RollingWindow, Series,
};

/// Mean of `values`, or None for an empty input or an overflowing sum.
pub fn mean<T: Numeric>(values: impl ExactSizeIterator<Item = T>) -> Option<T> {
    let len = values.len();
    if len == 0 {
        return None;
    }
    checked_sum(values)?.checked_div(T::from_count(len))
}

/// Mean of `values` after mapping each through a fallible `deviation`.
fn mean_deviation<T, I>(values: I, deviation: impl Fn(T) -> Option<T>) -> Option<T>
where
    T: Numeric,
    I: ExactSizeIterator<Item = T>,
{
    let len = values.len();
    if len == 0 {
        return None;
    }
    let total = values.into_iter().try_fold(T::zero(), |total, value| {
        total.checked_add(deviation(value)?)
    })?;
    total.checked_div(T::from_count(len))
}

/// Mean absolute deviation of `values` around `center` (their mean when None).
pub fn mean_absolute_deviation<T, I>(values: I, center: Option<T>) -> Option<T>
where
    T: Numeric,
    I: IntoIterator<Item = T>,
    I::IntoIter: ExactSizeIterator + Clone,
{
    let values = values.into_iter();
    let center = match center {
        Some(center) => center,
        None => mean(values.clone())?,
    };
    mean_deviation(values, |value| Some(value.checked_sub(center)?.abs()))
}

/// Population standard deviation of `values` around `center` (their mean when None).
///
/// None when a squared deviation leaves the numeric range.
pub fn standard_deviation<T, I>(values: I, center: Option<T>) -> Option<T>
where
    T: Numeric,
    I: IntoIterator<Item = T>,
    I::IntoIter: ExactSizeIterator + Clone,
{
    let values = values.into_iter();
    let center = match center {
        Some(center) => center,
        None => mean(values.clone())?,
    };
    let variance = mean_deviation(values, |value| {
        let diff = value.checked_sub(center)?;
        diff.checked_mul(diff)
    })?;
    Some(variance.sqrt())
}

fn midpoint<T: Numeric>(a: T, b: T) -> T {
    let two = T::from_int(2);
    match a.checked_add(b) {
        Some(sum) => sum / two,
        None => (a / two)
            .checked_add(b / two)
            .unwrap_or_else(|| partial_max(a, b)),
    }
}

/// Median of an ascending slice.
pub fn median<T: Numeric>(sorted: &[T]) -> Option<T> {
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => None,
        len if len % 2 == 0 => Some(midpoint(sorted[mid - 1], sorted[mid])),
        _ => Some(sorted[mid]),
    }
}

/// First and third quartile as medians of the lower and upper half.
///
/// With an odd count the middle value belongs to neither half. Needs at
/// least two values.
pub fn quartiles<T: Numeric>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    let mut sorted: Vec<T> = values.into_iter().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    let upper = if sorted.len() % 2 == 0 { mid } else { mid + 1 };
    Some((median(&sorted[..mid])?, median(&sorted[upper..])?))
}

/// Lowest and highest value of a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodResult<T> {
    pub lowest: T,
    pub highest: T,
}

/// Rolling lowest and highest value over the last N inputs.
#[derive(Debug, Clone)]
pub struct Period<T> {
    interval: usize,
    window: RollingWindow<T>,
    latest: Latest<PeriodResult<T>>,
}

impl<T: Numeric> Period<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("Period interval", interval)?;
        Ok(Self {
            interval,
            window: RollingWindow::new(interval),
            latest: Latest::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl<T: Numeric> Indicator for Period<T> {
    type Input = T;
    type Output = PeriodResult<T>;

    fn update(&mut self, value: T, replace: bool) -> Option<PeriodResult<T>> {
        self.window.update(value, replace);

        let result = self.window.is_full().then(|| {
            self.window.iter().fold(
                PeriodResult {
                    lowest: value,
                    highest: value,
                },
                |acc, value| PeriodResult {
                    lowest: partial_min(acc.lowest, value),
                    highest: partial_max(acc.highest, value),
                },
            )
        });
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<PeriodResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.window.is_full()
    }

    fn required_inputs(&self) -> usize {
        self.interval
    }

    fn name(&self) -> &str {
        "Period"
    }
}

/// Rolling dispersion measure over a full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispersion {
    MeanAbsolute,
    StandardDeviation,
}

#[derive(Debug, Clone)]
struct Dispersed<T> {
    interval: usize,
    kind: Dispersion,
    window: RollingWindow<T>,
    series: Series<T>,
}

impl<T: Numeric> Dispersed<T> {
    fn new(interval: usize, kind: Dispersion) -> Self {
        Self {
            interval,
            kind,
            window: RollingWindow::new(interval),
            series: Series::new(),
        }
    }

    fn update(&mut self, value: T, replace: bool) -> Option<T> {
        self.window.update(value, replace);

        let result = if self.window.is_full() {
            match self.kind {
                Dispersion::MeanAbsolute => mean_absolute_deviation(self.window.iter(), None),
                Dispersion::StandardDeviation => standard_deviation(self.window.iter(), None),
            }
        } else {
            None
        };
        self.series.record(result, replace)
    }
}

/// Mean Absolute Deviation (MAD).
#[derive(Debug, Clone)]
pub struct Mad<T>(Dispersed<T>);

/// Population Standard Deviation.
#[derive(Debug, Clone)]
pub struct StdDev<T>(Dispersed<T>);

impl<T: Numeric> Mad<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("MAD interval", interval)?;
        Ok(Self(Dispersed::new(interval, Dispersion::MeanAbsolute)))
    }
}

impl<T: Numeric> StdDev<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("StdDev interval", interval)?;
        Ok(Self(Dispersed::new(interval, Dispersion::StandardDeviation)))
    }
}

macro_rules! impl_dispersion {
    ($ty:ident, $name:literal) => {
        impl<T: Numeric> Indicator for $ty<T> {
            type Input = T;
            type Output = T;

            fn update(&mut self, value: T, replace: bool) -> Option<T> {
                self.0.update(value, replace)
            }

            fn result(&self) -> IndicatorResult<T> {
                self.0.series.result(self.0.interval)
            }

            fn is_stable(&self) -> bool {
                self.0.window.is_full()
            }

            fn required_inputs(&self) -> usize {
                self.0.interval
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
    };
}

impl_dispersion!(Mad, "MAD");
impl_dispersion!(StdDev, "StdDev");

/// Interquartile Range (IQR), `Q3 - Q1` of the window.
#[derive(Debug, Clone)]
pub struct Iqr<T> {
    interval: usize,
    window: RollingWindow<T>,
    series: Series<T>,
}

impl<T: Numeric> Iqr<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        if interval < 2 {
            return Err(IndicatorError::InvalidParameter(format!(
                "IQR interval must be at least 2, got {interval}"
            )));
        }
        Ok(Self {
            interval,
            window: RollingWindow::new(interval),
            series: Series::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}

impl<T: Numeric> Indicator for Iqr<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, value: T, replace: bool) -> Option<T> {
        self.window.update(value, replace);

        let result = if self.window.is_full() {
            quartiles(self.window.iter()).and_then(|(q1, q3)| q3.checked_sub(q1))
        } else {
            None
        };
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.interval)
    }

    fn is_stable(&self) -> bool {
        self.window.is_full()
    }

    fn required_inputs(&self) -> usize {
        self.interval
    }

    fn name(&self) -> &str {
        "IQR"
    }
}

impl<T: Numeric> IndicatorSeries for Iqr<T> {
    fn highest(&self) -> Option<T> {
        self.series.highest()
    }

    fn lowest(&self) -> Option<T> {
        self.series.lowest()
    }
}
