//! Band indicators: Bollinger Bands, Bollinger Bands Width and Acceleration Bands.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trading_core::{
    Candle, Indicator, IndicatorError, IndicatorResult, IndicatorSeries, Latest, Numeric,
    RollingWindow, Series,
};

use crate::moving_average::{MovingAverage, Smoothing};
use crate::statistics::standard_deviation;

/// Upper, middle and lower band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandsResult<T> {
    pub upper: T,
    pub middle: T,
    pub lower: T,
}

/// Bollinger Bands.
///
/// Middle band is a moving average, outer bands are `multiplier` population
/// standard deviations of the window away from it.
#[derive(Debug, Clone)]
pub struct BollingerBands<T> {
    interval: usize,
    multiplier: T,
    window: RollingWindow<T>,
    middle: MovingAverage<T>,
    latest: Latest<BandsResult<T>>,
}

impl<T: Numeric> BollingerBands<T> {
    /// Create Bollinger Bands over an SMA, typically (20, 2).
    pub fn new(interval: usize, multiplier: T) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, multiplier, Smoothing::Sma)
    }

    pub fn with_smoothing(interval: usize, multiplier: T, smoothing: Smoothing) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("Bollinger interval", interval)?;
        if multiplier < T::zero() {
            return Err(IndicatorError::InvalidParameter(format!(
                "Bollinger multiplier must not be negative, got {multiplier}"
            )));
        }
        debug!("Created Bollinger Bands({}, {}) with {:?} smoothing", interval, multiplier, smoothing);
        Ok(Self {
            interval,
            multiplier,
            window: RollingWindow::new(interval),
            middle: smoothing.build(interval)?,
            latest: Latest::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn multiplier(&self) -> T {
        self.multiplier
    }

    /// Prices currently inside the window, oldest first.
    pub fn prices(&self) -> impl Iterator<Item = T> + '_ {
        self.window.iter()
    }
}

impl<T: Numeric> Indicator for BollingerBands<T> {
    type Input = T;
    type Output = BandsResult<T>;

    fn update(&mut self, price: T, replace: bool) -> Option<BandsResult<T>> {
        self.window.update(price, replace);
        let middle = self.middle.update(price, replace);

        let result = match middle {
            Some(middle) if self.window.is_full() => {
                standard_deviation(self.window.iter(), Some(middle)).and_then(|deviation| {
                    let offset = deviation.checked_mul(self.multiplier)?;
                    Some(BandsResult {
                        upper: middle.checked_add(offset)?,
                        middle,
                        lower: middle.checked_sub(offset)?,
                    })
                })
            }
            _ => None,
        };
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<BandsResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.window.is_full() && self.middle.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.interval.max(self.middle.required_inputs())
    }

    fn name(&self) -> &str {
        "BBANDS"
    }
}

/// Bollinger Bands Width (BBW).
///
/// Band spread relative to the middle band, `(upper - lower) / middle`.
#[derive(Debug, Clone)]
pub struct BollingerBandsWidth<T> {
    bands: BollingerBands<T>,
    series: Series<T>,
}

impl<T: Numeric> BollingerBandsWidth<T> {
    pub fn new(bands: BollingerBands<T>) -> Self {
        Self {
            bands,
            series: Series::new(),
        }
    }

    pub fn bands(&self) -> &BollingerBands<T> {
        &self.bands
    }
}

impl<T: Numeric> Indicator for BollingerBandsWidth<T> {
    type Input = T;
    type Output = T;

    fn update(&mut self, price: T, replace: bool) -> Option<T> {
        let result = self.bands.update(price, replace).and_then(|bands| {
            if bands.middle.is_zero() {
                Some(T::zero())
            } else {
                bands.upper.checked_sub(bands.lower)?.checked_div(bands.middle)
            }
        });
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.bands.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.bands.required_inputs()
    }

    fn name(&self) -> &str {
        "BBW"
    }
}

impl<T: Numeric> IndicatorSeries for BollingerBandsWidth<T> {
    fn highest(&self) -> Option<T> {
        self.series.highest()
    }

    fn lowest(&self) -> Option<T> {
        self.series.lowest()
    }
}

/// Acceleration Bands by Price Headley.
///
/// Each candle contributes `c = width * (high - low) / (high + low)`; the lower
/// band smooths `low * (1 - c)`, the middle band the close and the upper band
/// `high * (1 + c)`.
#[derive(Debug, Clone)]
pub struct AccelerationBands<T> {
    width: T,
    lower: MovingAverage<T>,
    middle: MovingAverage<T>,
    upper: MovingAverage<T>,
    latest: Latest<BandsResult<T>>,
}

impl<T: Numeric> AccelerationBands<T> {
    /// Create Acceleration Bands over SMAs, typically (20, 4).
    pub fn new(interval: usize, width: T) -> IndicatorResult<Self> {
        Self::with_smoothing(interval, width, Smoothing::Sma)
    }

    pub fn with_smoothing(interval: usize, width: T, smoothing: Smoothing) -> IndicatorResult<Self> {
        let interval = IndicatorError::check_interval("Acceleration Bands interval", interval)?;
        Ok(Self {
            width,
            lower: smoothing.build(interval)?,
            middle: smoothing.build(interval)?,
            upper: smoothing.build(interval)?,
            latest: Latest::new(),
        })
    }

    pub fn width(&self) -> T {
        self.width
    }
}

impl<T: Numeric> Indicator for AccelerationBands<T> {
    type Input = Candle<T>;
    type Output = BandsResult<T>;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<BandsResult<T>> {
        let sum = candle.high + candle.low;
        let coefficient = if sum.is_zero() {
            T::zero()
        } else {
            self.width * (candle.high - candle.low) / sum
        };

        let lower = self
            .lower
            .update(candle.low * (T::one() - coefficient), replace);
        let middle = self.middle.update(candle.close, replace);
        let upper = self
            .upper
            .update(candle.high * (T::one() + coefficient), replace);

        let result = match (upper, middle, lower) {
            (Some(upper), Some(middle), Some(lower)) => Some(BandsResult {
                upper,
                middle,
                lower,
            }),
            _ => None,
        };
        self.latest.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<BandsResult<T>> {
        self.latest.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.middle.is_stable()
    }

    fn required_inputs(&self) -> usize {
        self.middle.required_inputs()
    }

    fn name(&self) -> &str {
        "ABANDS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    const PRICES: [f64; 15] = [
        81.59, 81.06, 82.87, 83.0, 83.61, 83.15, 82.84, 83.99, 84.55, 84.36, 85.53, 86.54, 86.89,
        87.77, 87.29,
    ];

    #[test]
    fn test_bollinger_bands() {
        // Test data verified with:
        // https://tulipindicators.org/bbands
        let expected_lower = [
            80.53, 80.99, 82.53, 82.47, 82.42, 82.44, 82.51, 83.14, 83.54, 83.87, 85.29,
        ];
        let expected_middle = [
            82.43, 82.74, 83.09, 83.32, 83.63, 83.78, 84.25, 84.99, 85.57, 86.22, 86.80,
        ];
        let expected_upper = [
            84.32, 84.49, 83.65, 84.16, 84.84, 85.12, 86.00, 86.85, 87.61, 88.57, 88.32,
        ];

        let mut bb = BollingerBands::new(5, 2.0).unwrap();
        let results: Vec<_> = bb.update_all(PRICES).into_iter().flatten().collect();

        assert_eq!(results.len(), 11);
        for (i, bands) in results.iter().enumerate() {
            assert!((bands.lower - expected_lower[i]).abs() < 0.005);
            assert!((bands.middle - expected_middle[i]).abs() < 0.005);
            assert!((bands.upper - expected_upper[i]).abs() < 0.005);
        }
    }

    #[test]
    fn test_bollinger_window_is_bounded() {
        let mut bb = BollingerBands::new(3, dec!(2)).unwrap();
        for price in 1..=6 {
            bb.add(Decimal::from(price));
            assert!(bb.prices().count() <= 3);
        }
        assert_eq!(bb.multiplier(), dec!(2));
    }

    #[test]
    fn test_bollinger_rejects_negative_multiplier() {
        assert!(BollingerBands::new(20, -1.0).is_err());
        assert!(BollingerBands::new(0, 2.0).is_err());
    }

    #[test]
    fn test_bollinger_not_enough_data() {
        let bb = BollingerBands::<f64>::new(20, 2.0).unwrap();
        assert_eq!(
            bb.result(),
            Err(IndicatorError::NotEnoughData { required: 20 })
        );
    }

    #[test]
    fn test_precise_bollinger_overflow_gives_no_result() {
        let mut bb = BollingerBands::new(2, dec!(2)).unwrap();
        bb.add(dec!(10000000000000000));
        assert_eq!(bb.add(dec!(-10000000000000000)), None);
        assert!(bb.result().is_err());

        bb.add(dec!(1));
        let bands = bb.add(dec!(3)).unwrap();
        assert_eq!(bands.middle, dec!(2));
        assert_eq!(bands.upper, dec!(4));
    }

    #[test]
    fn test_bollinger_bands_width() {
        let mut bbw = BollingerBandsWidth::new(BollingerBands::new(5, 2.0).unwrap());
        let width = bbw.update_all(PRICES)[4].unwrap();

        let bands = bbw.bands().result().unwrap();
        assert!(bands.upper > bands.lower);
        let latest = bbw.result().unwrap();
        assert!((latest - (bands.upper - bands.lower) / bands.middle).abs() < 1e-12);
        assert!((width - (84.32 - 80.53) / 82.43).abs() < 0.0005);
    }

    #[test]
    fn test_bollinger_bands_width_zero_middle() {
        let mut bbw = BollingerBandsWidth::new(BollingerBands::new(2, dec!(2)).unwrap());
        bbw.add(dec!(0));
        assert_eq!(bbw.add(dec!(0)), Some(dec!(0)));
    }

    #[test]
    fn test_acceleration_bands() {
        // Test data from:
        // https://github.com/QuantConnect/Lean/blob/master/Tests/TestData/spy_acceleration_bands_20_4.txt
        let candles = [
            (195.55, 198.05, 194.96),
            (192.59, 193.86, 191.61),
            (197.43, 197.61, 195.17),
            (194.79, 199.47, 194.35),
            (195.85, 197.22, 194.25),
            (196.74, 196.82, 194.53),
            (196.01, 197.01, 195.43),
            (198.46, 198.99, 195.96),
            (200.18, 200.41, 198.41),
            (199.73, 202.89, 199.28),
            (195.45, 198.68, 194.96),
            (196.46, 197.68, 195.21),
            (193.91, 194.46, 192.56),
            (193.6, 194.67, 192.91),
            (192.9, 193.45, 190.56),
            (192.85, 195.0, 191.81),
            (188.01, 191.91, 187.64),
            (188.12, 189.74, 186.93),
            (191.63, 191.83, 189.44),
            (192.13, 192.49, 189.82),
        ];

        let mut bands = AccelerationBands::new(20, 4.0).unwrap();
        assert!(!bands.is_stable());
        for (close, high, low) in candles {
            bands.add(Candle::hlc(high, low, close));
        }

        assert!(bands.is_stable());
        let result = bands.result().unwrap();
        assert!((result.lower - 187.6891).abs() < 0.0001);
        assert!((result.middle - 194.6195).abs() < 0.0001);
        assert!((result.upper - 201.8016).abs() < 0.0001);

        let result = bands.add(Candle::hlc(195.03, 189.12, 195.0)).unwrap();
        assert!((result.lower - 187.1217).abs() < 0.0001);
        assert!((result.middle - 194.5920).abs() < 0.0001);
        assert!((result.upper - 201.9392).abs() < 0.0001);
    }

    #[test]
    fn test_acceleration_bands_zero_prices() {
        let mut bands = AccelerationBands::new(1, dec!(4)).unwrap();
        let result = bands.add(Candle::hlc(dec!(0), dec!(0), dec!(0))).unwrap();

        assert_eq!(result.lower, dec!(0));
        assert_eq!(result.upper, dec!(0));
    }
}
