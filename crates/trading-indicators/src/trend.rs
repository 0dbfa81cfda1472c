//! Trend followers: the dual moving average (DMA) pair, linear regression
//! and the ZigZag swing filter.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    checked_sum, Candle, Indicator, IndicatorError, IndicatorResult, IndicatorSeries, Latest,
    Numeric, Rollback, RollingWindow, Series,
};

use crate::moving_average::{MovingAverage, Smoothing};

/// Short and long moving average of the same price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmaResult<T> {
    pub short: T,
    pub long: T,
}

impl<T: Numeric> DmaResult<T> {
    /// Whether the short average trades above the long one.
    pub fn is_bullish(&self) -> bool {
        self.short > self.long
    }
}

/// Dual Moving Average.
#[derive(Debug, Clone)]
pub struct Dma<T> {
    short: MovingAverage<T>,
    long: MovingAverage<T>,
    latest: Latest<DmaResult<T>>,
}

impl<T: Numeric> Dma<T> {
    /// Create a DMA over SMAs.
    pub fn new(short: usize, long: usize) -> IndicatorResult<Self> {
        Self::with_smoothing(short, long, Smoothing::Sma)
    }

    pub fn with_smoothing(short: usize, long: usize, smoothing: Smoothing) -> IndicatorResult<Self> {
        if short >= long {
            return Err(IndicatorError::InvalidParameter(format!(
                "DMA short interval ({short}) must be less than long interval ({long})"
            )));
        }
        debug!("Created DMA({}, {}) with {:?} smoothing", short, long, smoothing);
        Ok(Self {
            short: smoothing.build(short)?,
            long: smoothing.build(long)?,
            latest: Latest::new(),
        })
    }

    pub fn short(&self) -> &MovingAverage<T> {
        &self.short
    }

    pub fn long(&self) -> &MovingAverage<T> {
        &self.long
    }
}

impl<T: Numeric> Indicator for Dma<T> {
    type Input = T;
    type Output = DmaResult<T>;

    fn update(&mut self, price: T, replace: bool) -> Option<DmaResult<T>> {
        let short = self.short.update(price, replace);
        let long = self.long.update(price, replace);

        let result = match (short, long) {
            (Some(short), Some(long)) => Some(DmaResult { short, long }),
            _ => None,
        };
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<DmaResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.long.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.long.required_inputs()
    }

    fn name(&self) -> &str {
        "DMA"
    }
}

/// Least-squares line through the window, with the window positions
/// `0..n` as x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionResult<T> {
    /// Value of the line one step past the window
    pub prediction: T,
    pub slope: T,
    /// Value of the line at the oldest price
    pub intercept: T,
}

/// Linear regression over the last N prices.
#[derive(Debug, Clone)]
pub struct LinearRegression<T> {
    window: RollingWindow<T>,
    latest: Latest<LinearRegressionResult<T>>,
}

impl<T: Numeric> LinearRegression<T> {
    pub fn new(interval: usize) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("LINREG interval", interval)?;
        Ok(Self {
            window: RollingWindow::new(interval),
            latest: Latest::new(),
        })
    }

    fn regression(&self) -> Option<LinearRegressionResult<T>> {
        let n = T::from_count(self.window.len());
        let positions = (0..self.window.len()).map(T::from_count);

        let sum_x = checked_sum(positions.clone())?;
        let sum_xx = checked_sum(positions.clone().map(|x| x * x))?;
        let sum_y = checked_sum(self.window.iter())?;
        let sum_xy = positions
            .zip(self.window.iter())
            .try_fold(T::zero(), |sum, (x, y)| sum.checked_add(x.checked_mul(y)?))?;

        let denominator = n * sum_xx - sum_x * sum_x;
        // A single price has no direction
        let slope = if denominator.is_zero() {
            T::zero()
        } else {
            n.checked_mul(sum_xy)?
                .checked_sub(sum_x.checked_mul(sum_y)?)?
                .checked_div(denominator)?
        };
        let intercept = sum_y
            .checked_sub(slope.checked_mul(sum_x)?)?
            .checked_div(n)?;
        let prediction = slope.checked_mul(n)?.checked_add(intercept)?;

        Some(LinearRegressionResult {
            prediction,
            slope,
            intercept,
        })
    }
}

impl<T: Numeric> Indicator for LinearRegression<T> {
    type Input = T;
    type Output = LinearRegressionResult<T>;

    fn update(&mut self, price: T, replace: bool) -> Option<LinearRegressionResult<T>> {
        self.window.update(price, replace);
        let result = if self.window.is_full() {
            self.regression()
        } else {
            None
        };
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<LinearRegressionResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.window.is_full()
    }

    fn required_inputs(&self) -> usize {
        self.window.capacity()
    }

    fn name(&self) -> &str {
        "LINREG"
    }
}

/// ZigZag settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZigZagConfig<T> {
    /// Retracement in percent that confirms a swing, usually 5
    pub deviation: T,
}

impl<T: Numeric> Default for ZigZagConfig<T> {
    fn default() -> Self {
        Self {
            deviation: T::from_int(5),
        }
    }
}

impl<T: Numeric> ZigZagConfig<T> {
    pub fn validate(&self) -> IndicatorResult<()> {
        if self.deviation <= T::zero() || self.deviation >= T::from_int(100) {
            return Err(IndicatorError::InvalidParameter(format!(
                "ZigZag deviation must lie between 0 and 100 percent, got {}",
                self.deviation
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Swing<T> {
    is_up: bool,
    highest: T,
    lowest: T,
}

/// ZigZag swing filter.
///
/// Follows the extreme of the current swing and reports it once price
/// retraces by the configured deviation: a falling swing ends when the high
/// rises far enough above the low and yields the swing low, a rising swing
/// ends when the low drops back into the lower part of the range and yields
/// the swing high. Bars that confirm nothing produce no result.
#[derive(Debug, Clone)]
pub struct ZigZag<T> {
    config: ZigZagConfig<T>,
    swing: Rollback<Option<Swing<T>>>,
    series: Series<T>,
}

impl<T: Numeric> ZigZag<T> {
    pub fn new(config: ZigZagConfig<T>) -> IndicatorResult<Self> {
        config.validate()?;
        debug!("Created ZigZag with {}% deviation", config.deviation);
        Ok(Self {
            config,
            swing: Rollback::new(None),
            series: Series::new(),
        })
    }

    pub fn config(&self) -> &ZigZagConfig<T> {
        &self.config
    }

    /// Whether the swing in progress is rising.
    pub fn is_up(&self) -> bool {
        self.swing.current().is_some_and(|swing| swing.is_up)
    }
}

impl<T: Numeric> Indicator for ZigZag<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        let hundred = T::from_int(100);
        let deviation = self.config.deviation;
        let swing = self.swing.begin(replace).get_or_insert(Swing {
            is_up: false,
            highest: candle.high,
            lowest: candle.low,
        });

        let pivot = if swing.is_up {
            let reversal = swing
                .highest
                .checked_sub(swing.lowest)
                .and_then(|span| span.checked_mul(hundred - deviation))
                .and_then(|span| swing.lowest.checked_add(span / hundred));
            if candle.high > swing.highest {
                swing.highest = candle.high;
                None
            } else if reversal.is_some_and(|reversal| candle.low < reversal) {
                swing.is_up = false;
                swing.lowest = candle.low;
                Some(swing.highest)
            } else {
                None
            }
        } else {
            let reversal = swing
                .highest
                .checked_sub(candle.low)
                .and_then(|span| span.checked_mul(deviation))
                .and_then(|span| candle.low.checked_add(span / hundred));
            if candle.low < swing.lowest {
                swing.lowest = candle.low;
                None
            } else if reversal.is_some_and(|reversal| candle.high > reversal) {
                swing.is_up = true;
                swing.highest = candle.high;
                Some(swing.lowest)
            } else {
                None
            }
        };
        self.series.record(pivot, replace)
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
        "ZIGZAG"
    }
}

impl<T: Numeric> IndicatorSeries for ZigZag<T> {
    fn highest(&self) -> Option<T> {
        self.series.highest()
    }

    fn lowest(&self) -> Option<T> {
        self.series.lowest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dma() {
        let mut dma = Dma::new(3, 6).unwrap();
        let results = dma.update_all([dec!(1), dec!(2), dec!(3), dec!(4), dec!(5), dec!(6)]);

        assert!(results[..5].iter().all(Option::is_none));
        let result = results[5].unwrap();
        assert_eq!(result.short, dec!(5));
        assert_eq!(result.long, dec!(3.5));
        assert!(result.is_bullish());
        assert_eq!(dma.required_inputs(), 6);
    }

    #[test]
    fn test_dma_ema_crossover() {
        let mut dma = Dma::with_smoothing(2, 4, Smoothing::Ema).unwrap();
        dma.update_all([10.0, 10.0, 10.0, 10.0]);

        dma.add(5.0);
        let result = dma.result().unwrap();
        assert!(!result.is_bullish());
        assert_eq!(dma.short().smoothing(), Smoothing::Ema);

        let result = dma.replace(20.0).unwrap();
        assert!(result.is_bullish());
    }

    #[test]
    fn test_dma_rejects_inverted_intervals() {
        assert!(Dma::<f64>::new(6, 3).is_err());
        assert!(Dma::<f64>::new(5, 5).is_err());
        assert!(Dma::<f64>::new(0, 5).is_err());
    }

    #[test]
    fn test_linear_regression() {
        let mut linreg = LinearRegression::new(5).unwrap();
        let results = linreg.update_all([dec!(1.1), dec!(2.9), dec!(5.1), dec!(7.2), dec!(8.8)]);

        assert!(results[3].is_none());
        let result = results[4].unwrap();
        assert_eq!(result.slope, dec!(1.97));
        assert_eq!(result.intercept, dec!(1.08));
        assert_eq!(result.prediction, dec!(10.93));
    }

    #[test]
    fn test_linear_regression_replace() {
        let mut linreg = LinearRegression::new(5).unwrap();
        linreg.update_all([dec!(1.1), dec!(2.9), dec!(5.1), dec!(7.2), dec!(8.8)]);

        let next = linreg.add(dec!(10.9)).unwrap();
        assert_eq!(next.intercept, dec!(3.04));
        assert_eq!(next.prediction, dec!(12.89));

        let replaced = linreg.replace(dec!(2.9)).unwrap();
        assert!(replaced.slope < dec!(1));
        assert_eq!(linreg.replace(dec!(10.9)), Some(next));
    }

    #[test]
    fn test_linear_regression_single_price() {
        let mut linreg = LinearRegression::new(1).unwrap();
        let result = linreg.add(4.0).unwrap();

        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 4.0);
        assert_eq!(result.prediction, 4.0);
    }

    const ZIGZAG_HIGHS: [i64; 31] = [
        -8, -4, -1, 9, 8, 7, 6, 5, 4, 3, 2, 1, 11, 22, 33, 44, 55, 66, 77, 88, 88, 71, 61, 51, 41,
        51, 61, 71, 81, 91, 11,
    ];
    const ZIGZAG_LOWS: [i64; 31] = [
        -9, -5, -2, 8, 7, 6, 5, 4, 3, 2, 1, 0, 10, 20, 30, 40, 50, 60, 70, 80, 85, 70, 60, 50, 40,
        50, 60, 70, 80, 90, 10,
    ];

    fn swings() -> impl Iterator<Item = Candle<f64>> {
        ZIGZAG_HIGHS
            .into_iter()
            .zip(ZIGZAG_LOWS)
            .map(|(high, low)| Candle::hlc(high as f64, low as f64, low as f64))
    }

    #[test]
    fn test_zigzag() {
        // Test data verified with:
        // https://github.com/munrocket/ta-math/blob/abdba60394582fa5847f57e87969dcd2d22b6ce8/test/test.js#L306-L308
        let mut zigzag = ZigZag::new(ZigZagConfig { deviation: 15.0 }).unwrap();
        let pivots: Vec<f64> = zigzag.update_all(swings()).into_iter().flatten().collect();

        assert_eq!(pivots, [-9.0, 9.0, 0.0, 88.0, 40.0, 91.0]);
        assert_eq!(zigzag.required_inputs(), 1);
        assert_eq!(zigzag.highest(), Some(91.0));
        assert!(!zigzag.is_up());
    }

    #[test]
    fn test_zigzag_replace() {
        let mut zigzag = ZigZag::new(ZigZagConfig { deviation: 15.0 }).unwrap();
        zigzag.update_all(swings().take(21));
        assert!(zigzag.is_up());

        // Dropping into the lower range confirms the 88 top
        assert_eq!(zigzag.add(Candle::hlc(71.0, 70.0, 70.0)), Some(88.0));
        assert_eq!(zigzag.replace(Candle::hlc(90.0, 87.0, 87.0)), None);
        assert!(zigzag.is_up());
        assert_eq!(zigzag.result(), Ok(0.0));

        assert_eq!(zigzag.replace(Candle::hlc(71.0, 70.0, 70.0)), Some(88.0));
    }

    #[test]
    fn test_zigzag_config() {
        assert!(ZigZag::<f64>::new(ZigZagConfig::default()).is_ok());
        assert!(ZigZag::new(ZigZagConfig { deviation: 0.0 }).is_err());
        assert!(ZigZag::new(ZigZagConfig { deviation: dec!(100) }).is_err());
    }
}
