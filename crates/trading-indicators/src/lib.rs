//! Streaming technical indicators.
//!
//! Every indicator consumes one price or candle per time step, keeps only the
//! state it needs and supports amending the most recent input in place:
//! - Moving averages (SMA, EMA, WSMA, RMA, WMA, DEMA, DMA)
//! - Momentum and oscillators (RSI, MACD, Stochastic, StochRSI, CCI, Williams %R, MOM, ROC, CG, AO, AC, REI)
//! - Bands and dispersion (Bollinger Bands, Acceleration Bands, StdDev, MAD, IQR)
//! - Trend strength and reversal (ATR, DX, ADX, PSAR, TDS, LINREG, ZigZag)
//! - Volume (OBV, VWAP)
//!
//! Trend and momentum indicators with a directional reading also implement
//! [`SignalIndicator`](trading_core::SignalIndicator).
//!
//! All indicators are generic over [`Numeric`](trading_core::Numeric). The
//! [`precise`] module fixes them to `rust_decimal::Decimal` for exact results,
//! [`fast`] to `f64` for throughput. Both run the same algorithms.

pub mod directional;
pub mod momentum;
pub mod moving_average;
pub mod oscillator;
pub mod psar;
pub mod sequential;
mod signals;
pub mod statistics;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use directional::{Adx, AdxResult, Atr, DirectionalIndex, Dx, Tr};
pub use momentum::{Ac, Ao, Cg, Macd, MacdResult, Mom, Roc, Rsi};
pub use moving_average::{Dema, Ema, MovingAverage, Rma, Sma, Smma, Smoothing, Wma, Wsma};
pub use oscillator::{Cci, Rei, StochasticOscillator, StochasticResult, StochasticRsi, WilliamsR};
pub use psar::{Psar, PsarConfig};
pub use sequential::Tds;
pub use statistics::{Iqr, Mad, Period, PeriodResult, StdDev};
pub use trend::{Dma, DmaResult, LinearRegression, LinearRegressionResult, ZigZag, ZigZagConfig};
pub use volatility::{AccelerationBands, BandsResult, BollingerBands, BollingerBandsWidth};
pub use volume::{Obv, Vwap};

pub use trading_core::{
    Candle, Indicator, IndicatorError, IndicatorResult, IndicatorSeries, MomentumState, Numeric,
    Signal, SignalIndicator, TrendState,
};

macro_rules! backend {
    ($num:ty; $($name:ident),* $(,)?) => {
        $(pub type $name = crate::$name<$num>;)*
    };
}

/// Indicators over `f64`.
pub mod fast {
    backend!(f64;
        Sma, Ema, Wsma, Smma, Rma, Wma, Dema, MovingAverage, Dma, DmaResult,
        Rsi, Macd, MacdResult, Mom, Roc, Cg, Ao, Ac, Rei,
        StochasticOscillator, StochasticResult, StochasticRsi, Cci, WilliamsR,
        BollingerBands, BollingerBandsWidth, AccelerationBands, BandsResult,
        Period, PeriodResult, Mad, StdDev, Iqr,
        Tr, Atr, Dx, DirectionalIndex, Adx, AdxResult,
        Psar, PsarConfig, Tds, Obv, Vwap, Candle,
        LinearRegression, LinearRegressionResult, ZigZag, ZigZagConfig,
    );
}

/// Indicators over `rust_decimal::Decimal`.
pub mod precise {
    use rust_decimal::Decimal;

    backend!(Decimal;
        Sma, Ema, Wsma, Smma, Rma, Wma, Dema, MovingAverage, Dma, DmaResult,
        Rsi, Macd, MacdResult, Mom, Roc, Cg, Ao, Ac, Rei,
        StochasticOscillator, StochasticResult, StochasticRsi, Cci, WilliamsR,
        BollingerBands, BollingerBandsWidth, AccelerationBands, BandsResult,
        Period, PeriodResult, Mad, StdDev, Iqr,
        Tr, Atr, Dx, DirectionalIndex, Adx, AdxResult,
        Psar, PsarConfig, Tds, Obv, Vwap, Candle,
        LinearRegression, LinearRegressionResult, ZigZag, ZigZagConfig,
    );
}
