//! Configuration structures.

use serde::{Deserialize, Serialize};
use trading_core::{IndicatorError, IndicatorResult, Numeric};
use trading_indicators::{
    AccelerationBands, Ac, Adx, Ao, Atr, BollingerBands, BollingerBandsWidth, Cci, Cg, Dema, Dma,
    Dx, Ema, Iqr, LinearRegression, Macd, Mad, Mom, Obv, Period, Psar, PsarConfig, Rei, Rma, Roc,
    Rsi, Sma, Smoothing, StdDev, StochasticOscillator, StochasticRsi, Tds, Tr, Vwap, WilliamsR,
    Wma, Wsma, ZigZag, ZigZagConfig,
};

use crate::indicator::AnyIndicator;

/// Main engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicators: Vec<NamedIndicator>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// An indicator instance with the label its results are reported under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedIndicator {
    pub name: String,
    #[serde(flatten)]
    pub spec: IndicatorSpec,
}

/// Indicator kind and parameters.
///
/// Omitted smoothing falls back to the indicator's conventional average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorSpec {
    Sma { interval: usize },
    Ema { interval: usize },
    #[serde(alias = "smma")]
    Wsma { interval: usize },
    Rma { interval: usize },
    Wma { interval: usize },
    Dema { interval: usize },
    Dma {
        short: usize,
        long: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Rsi {
        #[serde(default = "default_interval")]
        interval: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Macd {
        #[serde(default = "default_macd_short")]
        short: usize,
        #[serde(default = "default_macd_long")]
        long: usize,
        #[serde(default = "default_macd_signal")]
        signal: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Stochastic {
        #[serde(default = "default_interval")]
        n: usize,
        #[serde(default = "default_stochastic_smoothing")]
        m: usize,
        #[serde(default = "default_stochastic_smoothing")]
        p: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    StochasticRsi {
        #[serde(default = "default_interval")]
        interval: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Cci {
        #[serde(default = "default_bands_interval")]
        interval: usize,
    },
    WilliamsR {
        #[serde(default = "default_interval")]
        interval: usize,
    },
    Mom { interval: usize },
    Roc { interval: usize },
    Cg { interval: usize, signal: usize },
    Ao {
        #[serde(default = "default_ao_short")]
        short: usize,
        #[serde(default = "default_ao_long")]
        long: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Ac {
        #[serde(default = "default_ao_short")]
        short: usize,
        #[serde(default = "default_ao_long")]
        long: usize,
        #[serde(default = "default_ao_short")]
        signal: usize,
    },
    Bollinger {
        #[serde(default = "default_bands_interval")]
        interval: usize,
        #[serde(default = "default_bollinger_multiplier")]
        multiplier: f64,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    BollingerWidth {
        #[serde(default = "default_bands_interval")]
        interval: usize,
        #[serde(default = "default_bollinger_multiplier")]
        multiplier: f64,
    },
    AccelerationBands {
        #[serde(default = "default_bands_interval")]
        interval: usize,
        #[serde(default = "default_acceleration_width")]
        width: f64,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Tr,
    Atr {
        #[serde(default = "default_interval")]
        interval: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Dx {
        #[serde(default = "default_interval")]
        interval: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Adx {
        #[serde(default = "default_interval")]
        interval: usize,
        #[serde(default)]
        smoothing: Option<Smoothing>,
    },
    Psar {
        #[serde(default = "default_psar_step")]
        step: f64,
        #[serde(default = "default_psar_max")]
        max: f64,
    },
    Tds,
    Obv,
    Vwap,
    Rei {
        #[serde(default = "default_rei_interval")]
        interval: usize,
    },
    #[serde(alias = "linreg")]
    LinearRegression { interval: usize },
    #[serde(alias = "zig_zag")]
    Zigzag {
        #[serde(default = "default_zigzag_deviation")]
        deviation: f64,
    },
    Period { interval: usize },
    Mad { interval: usize },
    StdDev { interval: usize },
    Iqr { interval: usize },
}

fn default_interval() -> usize {
    14
}

fn default_macd_short() -> usize {
    12
}

fn default_macd_long() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_stochastic_smoothing() -> usize {
    3
}

fn default_ao_short() -> usize {
    5
}

fn default_ao_long() -> usize {
    34
}

fn default_bands_interval() -> usize {
    20
}

fn default_bollinger_multiplier() -> f64 {
    2.0
}

fn default_acceleration_width() -> f64 {
    4.0
}

fn default_psar_step() -> f64 {
    0.02
}

fn default_psar_max() -> f64 {
    0.2
}

fn default_rei_interval() -> usize {
    8
}

fn default_zigzag_deviation() -> f64 {
    5.0
}

/// Convert a configured float into the target backend.
fn number<T: Numeric>(name: &str, value: f64) -> IndicatorResult<T> {
    T::from_f64(value).ok_or_else(|| {
        IndicatorError::InvalidParameter(format!("{name} ({value}) is not a finite number"))
    })
}

/// Use the given smoothing, or the indicator's default constructor.
macro_rules! smoothed {
    ($smoothing:expr, $ty:ident :: new($($arg:expr),*)) => {
        match $smoothing {
            Some(smoothing) => $ty::with_smoothing($($arg,)* smoothing),
            None => $ty::new($($arg),*),
        }
    };
}

impl IndicatorSpec {
    /// Construct the runtime indicator for the chosen numeric backend.
    pub fn build<T: Numeric>(&self) -> IndicatorResult<AnyIndicator<T>> {
        Ok(match *self {
            IndicatorSpec::Sma { interval } => AnyIndicator::Sma(Sma::new(interval)?),
            IndicatorSpec::Ema { interval } => AnyIndicator::Ema(Ema::new(interval)?),
            IndicatorSpec::Wsma { interval } => AnyIndicator::Wsma(Wsma::new(interval)?),
            IndicatorSpec::Rma { interval } => AnyIndicator::Rma(Rma::new(interval)?),
            IndicatorSpec::Wma { interval } => AnyIndicator::Wma(Wma::new(interval)?),
            IndicatorSpec::Dema { interval } => AnyIndicator::Dema(Dema::new(interval)?),
            IndicatorSpec::Dma {
                short,
                long,
                smoothing,
            } => AnyIndicator::Dma(smoothed!(smoothing, Dma::new(short, long))?),
            IndicatorSpec::Rsi {
                interval,
                smoothing,
            } => AnyIndicator::Rsi(smoothed!(smoothing, Rsi::new(interval))?),
            IndicatorSpec::Macd {
                short,
                long,
                signal,
                smoothing,
            } => AnyIndicator::Macd(smoothed!(smoothing, Macd::new(short, long, signal))?),
            IndicatorSpec::Stochastic { n, m, p, smoothing } => {
                AnyIndicator::Stochastic(smoothed!(smoothing, StochasticOscillator::new(n, m, p))?)
            }
            IndicatorSpec::StochasticRsi {
                interval,
                smoothing,
            } => AnyIndicator::StochasticRsi(smoothed!(smoothing, StochasticRsi::new(interval))?),
            IndicatorSpec::Cci { interval } => AnyIndicator::Cci(Cci::new(interval)?),
            IndicatorSpec::WilliamsR { interval } => AnyIndicator::WilliamsR(WilliamsR::new(interval)?),
            IndicatorSpec::Mom { interval } => AnyIndicator::Mom(Mom::new(interval)?),
            IndicatorSpec::Roc { interval } => AnyIndicator::Roc(Roc::new(interval)?),
            IndicatorSpec::Cg { interval, signal } => AnyIndicator::Cg(Cg::new(interval, signal)?),
            IndicatorSpec::Ao {
                short,
                long,
                smoothing,
            } => AnyIndicator::Ao(smoothed!(smoothing, Ao::new(short, long))?),
            IndicatorSpec::Ac {
                short,
                long,
                signal,
            } => AnyIndicator::Ac(Ac::new(short, long, signal)?),
            IndicatorSpec::Bollinger {
                interval,
                multiplier,
                smoothing,
            } => {
                let multiplier = number("Bollinger multiplier", multiplier)?;
                AnyIndicator::Bollinger(smoothed!(smoothing, BollingerBands::new(interval, multiplier))?)
            }
            IndicatorSpec::BollingerWidth {
                interval,
                multiplier,
            } => {
                let multiplier = number("Bollinger multiplier", multiplier)?;
                AnyIndicator::BollingerWidth(BollingerBandsWidth::new(BollingerBands::new(
                    interval, multiplier,
                )?))
            }
            IndicatorSpec::AccelerationBands {
                interval,
                width,
                smoothing,
            } => {
                let width = number("Acceleration band width", width)?;
                AnyIndicator::AccelerationBands(smoothed!(
                    smoothing,
                    AccelerationBands::new(interval, width)
                )?)
            }
            IndicatorSpec::Tr => AnyIndicator::Tr(Tr::new()),
            IndicatorSpec::Atr {
                interval,
                smoothing,
            } => AnyIndicator::Atr(smoothed!(smoothing, Atr::new(interval))?),
            IndicatorSpec::Dx {
                interval,
                smoothing,
            } => AnyIndicator::Dx(smoothed!(smoothing, Dx::new(interval))?),
            IndicatorSpec::Adx {
                interval,
                smoothing,
            } => AnyIndicator::Adx(smoothed!(smoothing, Adx::new(interval))?),
            IndicatorSpec::Psar { step, max } => AnyIndicator::Psar(Psar::new(PsarConfig {
                step: number("PSAR step", step)?,
                max: number("PSAR max", max)?,
            })?),
            IndicatorSpec::Tds => AnyIndicator::Tds(Tds::new()),
            IndicatorSpec::Obv => AnyIndicator::Obv(Obv::new()),
            IndicatorSpec::Vwap => AnyIndicator::Vwap(Vwap::new()),
            IndicatorSpec::Rei { interval } => AnyIndicator::Rei(Rei::new(interval)?),
            IndicatorSpec::LinearRegression { interval } => {
                AnyIndicator::LinearRegression(LinearRegression::new(interval)?)
            }
            IndicatorSpec::Zigzag { deviation } => AnyIndicator::ZigZag(ZigZag::new(ZigZagConfig {
                deviation: number("ZigZag deviation", deviation)?,
            })?),
            IndicatorSpec::Period { interval } => AnyIndicator::Period(Period::new(interval)?),
            IndicatorSpec::Mad { interval } => AnyIndicator::Mad(Mad::new(interval)?),
            IndicatorSpec::StdDev { interval } => AnyIndicator::StdDev(StdDev::new(interval)?),
            IndicatorSpec::Iqr { interval } => AnyIndicator::Iqr(Iqr::new(interval)?),
        })
    }
}
