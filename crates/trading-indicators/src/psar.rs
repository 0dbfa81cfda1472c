//! Parabolic Stop and Reverse (PSAR) by J. Welles Wilder.
//!
//! A trailing stop that accelerates towards price while a trend extends and
//! flips to the other side of price when it is penetrated.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use trading_core::{
    partial_max, partial_min, Candle, Indicator, IndicatorError, IndicatorResult,
    IndicatorSeries, Numeric, Rollback, Series,
};

/// Acceleration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsarConfig<T> {
    /// Initial acceleration and per-extreme increment, usually 0.02
    pub step: T,
    /// Acceleration cap, usually 0.2
    pub max: T,
}

impl<T: Numeric> Default for PsarConfig<T> {
    fn default() -> Self {
        Self {
            step: T::ratio(2, 100),
            max: T::ratio(2, 10),
        }
    }
}

impl<T: Numeric> PsarConfig<T> {
    pub fn validate(&self) -> IndicatorResult<()> {
        if self.step <= T::zero() {
            return Err(IndicatorError::InvalidParameter(format!(
                "PSAR acceleration step must be positive, got {}",
                self.step
            )));
        }
        if self.step >= self.max {
            return Err(IndicatorError::InvalidParameter(format!(
                "PSAR acceleration step ({}) must be less than the maximum ({})",
                self.step, self.max
            )));
        }
        Ok(())
    }
}

/// High and low of a recent candle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extent<T> {
    high: T,
    low: T,
}

/// The two most recent candles, newest first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lookback<T> {
    previous: Option<Extent<T>>,
    pre_previous: Option<Extent<T>>,
}

impl<T: Numeric> Lookback<T> {
    fn push(&mut self, extent: Extent<T>) {
        self.pre_previous = self.previous.replace(extent);
    }

    /// Lowest low of the lookback, which an uptrend SAR may not exceed.
    fn floor(&self) -> Option<T> {
        match (self.previous, self.pre_previous) {
            (Some(prev), Some(pre)) => Some(partial_min(prev.low, pre.low)),
            (Some(prev), None) => Some(prev.low),
            _ => None,
        }
    }

    /// Highest high of the lookback, which a downtrend SAR may not fall below.
    fn ceiling(&self) -> Option<T> {
        match (self.previous, self.pre_previous) {
            (Some(prev), Some(pre)) => Some(partial_max(prev.high, pre.high)),
            (Some(prev), None) => Some(prev.high),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Trend<T> {
    is_long: bool,
    acceleration: T,
    extreme: T,
    sar: T,
}

#[derive(Debug, Clone, Copy)]
struct PsarState<T> {
    trend: Option<Trend<T>>,
    lookback: Lookback<T>,
}

/// Parabolic SAR.
#[derive(Debug, Clone)]
pub struct Psar<T> {
    config: PsarConfig<T>,
    state: Rollback<PsarState<T>>,
    series: Series<T>,
}

impl<T: Numeric> Psar<T> {
    pub fn new(config: PsarConfig<T>) -> IndicatorResult<Self> {
        config.validate()?;
        debug!("Created PSAR(step={}, max={})", config.step, config.max);
        Ok(Self {
            config,
            state: Rollback::new(PsarState {
                trend: None,
                lookback: Lookback {
                    previous: None,
                    pre_previous: None,
                },
            }),
            series: Series::new(),
        })
    }

    pub fn config(&self) -> &PsarConfig<T> {
        &self.config
    }

    /// Trend direction, known from the second candle on.
    pub fn is_long(&self) -> Option<bool> {
        self.state.current().trend.map(|trend| trend.is_long)
    }

    /// Current acceleration factor.
    pub fn acceleration(&self) -> Option<T> {
        self.state.current().trend.map(|trend| trend.acceleration)
    }

    /// First trend, from the direction of the median price.
    fn start(previous: Extent<T>, candle: &Candle<T>, step: T) -> Trend<T> {
        let two = T::from_int(2);
        let is_long = (candle.high + candle.low) / two >= (previous.high + previous.low) / two;
        if is_long {
            Trend {
                is_long,
                acceleration: step,
                extreme: candle.high,
                sar: previous.low,
            }
        } else {
            Trend {
                is_long,
                acceleration: step,
                extreme: candle.low,
                sar: previous.high,
            }
        }
    }

    fn advance(
        config: &PsarConfig<T>,
        trend: Trend<T>,
        lookback: &Lookback<T>,
        candle: &Candle<T>,
    ) -> Trend<T> {
        let mut sar = trend.sar + trend.acceleration * (trend.extreme - trend.sar);
        let mut next = trend;
        let epsilon = T::ratio(1, 100);

        if trend.is_long {
            if let Some(floor) = lookback.floor() {
                sar = partial_min(sar, floor);
            }
            if candle.high > trend.extreme {
                next.extreme = candle.high;
                next.acceleration = partial_min(trend.acceleration + config.step, config.max);
            }
            if candle.low < sar {
                debug!("PSAR reversed to short at {}", trend.extreme);
                next.is_long = false;
                sar = next.extreme;
                next.extreme = candle.low;
                next.acceleration = config.step;
                if sar <= candle.high {
                    sar = candle.high + epsilon;
                }
            }
        } else {
            if let Some(ceiling) = lookback.ceiling() {
                sar = partial_max(sar, ceiling);
            }
            if candle.low < trend.extreme {
                next.extreme = candle.low;
                next.acceleration = partial_min(trend.acceleration + config.step, config.max);
            }
            if candle.high > sar {
                debug!("PSAR reversed to long at {}", trend.extreme);
                next.is_long = true;
                sar = next.extreme;
                next.extreme = candle.high;
                next.acceleration = config.step;
                if sar >= candle.low {
                    sar = candle.low - epsilon;
                }
            }
        }

        next.sar = sar;
        next
    }
}

impl<T: Numeric> Indicator for Psar<T> {
    type Input = Candle<T>;
    type Output = T;

    fn update(&mut self, candle: Candle<T>, replace: bool) -> Option<T> {
        if replace {
            trace!("PSAR replacing latest candle");
        }
        let config = self.config;
        let state = self.state.begin(replace);
        let extent = Extent {
            high: candle.high,
            low: candle.low,
        };

        let trend = match (state.trend, state.lookback.previous) {
            (Some(trend), _) => Some(Self::advance(&config, trend, &state.lookback, &candle)),
            (None, Some(previous)) => Some(Self::start(previous, &candle, config.step)),
            (None, None) => None,
        };
        state.trend = trend;
        state.lookback.push(extent);

        let result = trend.map(|trend| trend.sar);
        self.series.record(result, replace)
    }

    fn result(&self) -> IndicatorResult<T> {
        self.series.result(self.required_inputs())
    }

    fn is_stable(&self) -> bool {
        self.state.current().trend.is_some()
    }

    fn required_inputs(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "PSAR"
    }
}

impl<T: Numeric> IndicatorSeries for Psar<T> {
    fn highest(&self) -> Option<T> {
        self.series.highest()
    }

    fn lowest(&self) -> Option<T> {
        self.series.lowest()
    }
}
