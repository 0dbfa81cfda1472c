//! Indicators selected at runtime from configuration.

use serde::{Deserialize, Serialize};
use trading_core::{
    Candle, Indicator, IndicatorResult, MomentumState, Numeric, Signal, SignalIndicator,
    TrendState,
};
use trading_indicators::{
    AccelerationBands, Ac, Adx, AdxResult, Ao, Atr, BandsResult, BollingerBands,
    BollingerBandsWidth, Cci, Cg, Dema, Dma, DmaResult, Dx, Ema, Iqr, LinearRegression,
    LinearRegressionResult, Macd, MacdResult, Mad, Mom, Obv, Period, PeriodResult, Psar, Rei, Rma,
    Roc, Rsi, Sma, StdDev, StochasticOscillator, StochasticResult, StochasticRsi, Tds, Tr, Vwap,
    WilliamsR, Wma, Wsma, ZigZag,
};

/// Output of any configured indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorValue<T> {
    Scalar { value: T },
    Bands(BandsResult<T>),
    Stochastic(StochasticResult<T>),
    Macd(MacdResult<T>),
    Adx(AdxResult<T>),
    Dma(DmaResult<T>),
    Period(PeriodResult<T>),
    Regression(LinearRegressionResult<T>),
}

impl<T: Numeric> IndicatorValue<T> {
    /// The headline number: the value itself, the middle band, %K, the MACD
    /// line, the ADX, the short average, the window high or the regression
    /// prediction.
    pub fn primary(&self) -> T {
        match *self {
            IndicatorValue::Scalar { value } => value,
            IndicatorValue::Bands(bands) => bands.middle,
            IndicatorValue::Stochastic(stochastic) => stochastic.k,
            IndicatorValue::Macd(macd) => macd.macd,
            IndicatorValue::Adx(adx) => adx.adx,
            IndicatorValue::Dma(dma) => dma.short,
            IndicatorValue::Period(period) => period.highest,
            IndicatorValue::Regression(regression) => regression.prediction,
        }
    }
}

/// Every indicator behind one type, fed with whole candles.
#[derive(Debug, Clone)]
pub enum AnyIndicator<T> {
    Sma(Sma<T>),
    Ema(Ema<T>),
    Wsma(Wsma<T>),
    Rma(Rma<T>),
    Wma(Wma<T>),
    Dema(Dema<T>),
    Dma(Dma<T>),
    Rsi(Rsi<T>),
    Macd(Macd<T>),
    Stochastic(StochasticOscillator<T>),
    StochasticRsi(StochasticRsi<T>),
    Cci(Cci<T>),
    WilliamsR(WilliamsR<T>),
    Mom(Mom<T>),
    Roc(Roc<T>),
    Cg(Cg<T>),
    Ao(Ao<T>),
    Ac(Ac<T>),
    Bollinger(BollingerBands<T>),
    BollingerWidth(BollingerBandsWidth<T>),
    AccelerationBands(AccelerationBands<T>),
    Tr(Tr<T>),
    Atr(Atr<T>),
    Dx(Dx<T>),
    Adx(Adx<T>),
    Psar(Psar<T>),
    Tds(Tds<T>),
    Obv(Obv<T>),
    Vwap(Vwap<T>),
    Rei(Rei<T>),
    LinearRegression(LinearRegression<T>),
    ZigZag(ZigZag<T>),
    Period(Period<T>),
    Mad(Mad<T>),
    StdDev(StdDev<T>),
    Iqr(Iqr<T>),
}

macro_rules! dispatch {
    ($self:ident, $indicator:ident => $body:expr) => {
        match $self {
            AnyIndicator::Sma($indicator) => $body,
            AnyIndicator::Ema($indicator) => $body,
            AnyIndicator::Wsma($indicator) => $body,
            AnyIndicator::Rma($indicator) => $body,
            AnyIndicator::Wma($indicator) => $body,
            AnyIndicator::Dema($indicator) => $body,
            AnyIndicator::Dma($indicator) => $body,
            AnyIndicator::Rsi($indicator) => $body,
            AnyIndicator::Macd($indicator) => $body,
            AnyIndicator::Stochastic($indicator) => $body,
            AnyIndicator::StochasticRsi($indicator) => $body,
            AnyIndicator::Cci($indicator) => $body,
            AnyIndicator::WilliamsR($indicator) => $body,
            AnyIndicator::Mom($indicator) => $body,
            AnyIndicator::Roc($indicator) => $body,
            AnyIndicator::Cg($indicator) => $body,
            AnyIndicator::Ao($indicator) => $body,
            AnyIndicator::Ac($indicator) => $body,
            AnyIndicator::Bollinger($indicator) => $body,
            AnyIndicator::BollingerWidth($indicator) => $body,
            AnyIndicator::AccelerationBands($indicator) => $body,
            AnyIndicator::Tr($indicator) => $body,
            AnyIndicator::Atr($indicator) => $body,
            AnyIndicator::Dx($indicator) => $body,
            AnyIndicator::Adx($indicator) => $body,
            AnyIndicator::Psar($indicator) => $body,
            AnyIndicator::Tds($indicator) => $body,
            AnyIndicator::Obv($indicator) => $body,
            AnyIndicator::Vwap($indicator) => $body,
            AnyIndicator::Rei($indicator) => $body,
            AnyIndicator::LinearRegression($indicator) => $body,
            AnyIndicator::ZigZag($indicator) => $body,
            AnyIndicator::Period($indicator) => $body,
            AnyIndicator::Mad($indicator) => $body,
            AnyIndicator::StdDev($indicator) => $body,
            AnyIndicator::Iqr($indicator) => $body,
        }
    };
}

fn scalar<T>(value: Option<T>) -> Option<IndicatorValue<T>> {
    value.map(|value| IndicatorValue::Scalar { value })
}

impl<T: Numeric> AnyIndicator<T> {
    /// Feed a candle. Price indicators consume its close.
    pub fn update_candle(&mut self, candle: &Candle<T>, replace: bool) -> Option<IndicatorValue<T>> {
        let candle = *candle;
        let close = candle.close;
        match self {
            AnyIndicator::Sma(sma) => scalar(sma.update(close, replace)),
            AnyIndicator::Ema(ema) => scalar(ema.update(close, replace)),
            AnyIndicator::Wsma(wsma) => scalar(wsma.update(close, replace)),
            AnyIndicator::Rma(rma) => scalar(rma.update(close, replace)),
            AnyIndicator::Wma(wma) => scalar(wma.update(close, replace)),
            AnyIndicator::Dema(dema) => scalar(dema.update(close, replace)),
            AnyIndicator::Dma(dma) => dma.update(close, replace).map(IndicatorValue::Dma),
            AnyIndicator::Rsi(rsi) => scalar(rsi.update(close, replace)),
            AnyIndicator::Macd(macd) => macd.update(close, replace).map(IndicatorValue::Macd),
            AnyIndicator::Stochastic(stochastic) => stochastic
                .update(candle, replace)
                .map(IndicatorValue::Stochastic),
            AnyIndicator::StochasticRsi(stoch_rsi) => scalar(stoch_rsi.update(close, replace)),
            AnyIndicator::Cci(cci) => scalar(cci.update(candle, replace)),
            AnyIndicator::WilliamsR(williams) => scalar(williams.update(candle, replace)),
            AnyIndicator::Mom(mom) => scalar(mom.update(close, replace)),
            AnyIndicator::Roc(roc) => scalar(roc.update(close, replace)),
            AnyIndicator::Cg(cg) => scalar(cg.update(close, replace)),
            AnyIndicator::Ao(ao) => scalar(ao.update(candle, replace)),
            AnyIndicator::Ac(ac) => scalar(ac.update(candle, replace)),
            AnyIndicator::Bollinger(bands) => bands.update(close, replace).map(IndicatorValue::Bands),
            AnyIndicator::BollingerWidth(width) => scalar(width.update(close, replace)),
            AnyIndicator::AccelerationBands(bands) => {
                bands.update(candle, replace).map(IndicatorValue::Bands)
            }
            AnyIndicator::Tr(tr) => scalar(tr.update(candle, replace)),
            AnyIndicator::Atr(atr) => scalar(atr.update(candle, replace)),
            AnyIndicator::Dx(dx) => scalar(dx.update(candle, replace)),
            AnyIndicator::Adx(adx) => adx.update(candle, replace).map(IndicatorValue::Adx),
            AnyIndicator::Psar(psar) => scalar(psar.update(candle, replace)),
            AnyIndicator::Tds(tds) => scalar(tds.update(close, replace)),
            AnyIndicator::Obv(obv) => scalar(obv.update(candle, replace)),
            AnyIndicator::Vwap(vwap) => scalar(vwap.update(candle, replace)),
            AnyIndicator::Rei(rei) => scalar(rei.update(candle, replace)),
            AnyIndicator::LinearRegression(linreg) => {
                linreg.update(close, replace).map(IndicatorValue::Regression)
            }
            AnyIndicator::ZigZag(zigzag) => scalar(zigzag.update(candle, replace)),
            AnyIndicator::Period(period) => period.update(close, replace).map(IndicatorValue::Period),
            AnyIndicator::Mad(mad) => scalar(mad.update(close, replace)),
            AnyIndicator::StdDev(std_dev) => scalar(std_dev.update(close, replace)),
            AnyIndicator::Iqr(iqr) => scalar(iqr.update(close, replace)),
        }
    }

    /// Latest value, failing with `NotEnoughData` before stability.
    pub fn result(&self) -> IndicatorResult<IndicatorValue<T>> {
        match self {
            AnyIndicator::Dma(dma) => dma.result().map(IndicatorValue::Dma),
            AnyIndicator::Macd(macd) => macd.result().map(IndicatorValue::Macd),
            AnyIndicator::Stochastic(stochastic) => stochastic.result().map(IndicatorValue::Stochastic),
            AnyIndicator::Bollinger(bands) => bands.result().map(IndicatorValue::Bands),
            AnyIndicator::AccelerationBands(bands) => bands.result().map(IndicatorValue::Bands),
            AnyIndicator::Adx(adx) => adx.result().map(IndicatorValue::Adx),
            AnyIndicator::Period(period) => period.result().map(IndicatorValue::Period),
            AnyIndicator::LinearRegression(linreg) => {
                linreg.result().map(IndicatorValue::Regression)
            }
            AnyIndicator::Rma(rma) => rma.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Vwap(vwap) => vwap.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Rei(rei) => rei.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::ZigZag(zigzag) => {
                zigzag.result().map(|value| IndicatorValue::Scalar { value })
            }
            AnyIndicator::Iqr(iqr) => iqr.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Sma(sma) => sma.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Ema(ema) => ema.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Wsma(wsma) => wsma.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Wma(wma) => wma.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Dema(dema) => dema.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Rsi(rsi) => rsi.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::StochasticRsi(stoch_rsi) => {
                stoch_rsi.result().map(|value| IndicatorValue::Scalar { value })
            }
            AnyIndicator::Cci(cci) => cci.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::WilliamsR(williams) => {
                williams.result().map(|value| IndicatorValue::Scalar { value })
            }
            AnyIndicator::Mom(mom) => mom.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Roc(roc) => roc.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Cg(cg) => cg.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Ao(ao) => ao.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Ac(ac) => ac.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::BollingerWidth(width) => {
                width.result().map(|value| IndicatorValue::Scalar { value })
            }
            AnyIndicator::Tr(tr) => tr.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Atr(atr) => atr.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Dx(dx) => dx.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Psar(psar) => psar.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Tds(tds) => tds.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Obv(obv) => obv.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::Mad(mad) => mad.result().map(|value| IndicatorValue::Scalar { value }),
            AnyIndicator::StdDev(std_dev) => {
                std_dev.result().map(|value| IndicatorValue::Scalar { value })
            }
        }
    }

    pub fn is_stable(&self) -> bool {
        dispatch!(self, indicator => indicator.is_stable())
    }

    pub fn required_inputs(&self) -> usize {
        dispatch!(self, indicator => indicator.required_inputs())
    }

    pub fn name(&self) -> &str {
        dispatch!(self, indicator => indicator.name())
    }

    /// Trend reading, for indicators that provide one.
    pub fn trend_signal(&self) -> Option<Signal<TrendState>> {
        match self {
            AnyIndicator::Mom(mom) => Some(mom.signal()),
            AnyIndicator::Roc(roc) => Some(roc.signal()),
            AnyIndicator::Ao(ao) => Some(ao.signal()),
            AnyIndicator::Ac(ac) => Some(ac.signal()),
            AnyIndicator::Macd(macd) => Some(macd.signal()),
            AnyIndicator::Obv(obv) => Some(obv.signal()),
            AnyIndicator::Tds(tds) => Some(tds.signal()),
            _ => None,
        }
    }

    /// Overbought/oversold reading, for oscillators that provide one.
    pub fn momentum_signal(&self) -> Option<Signal<MomentumState>> {
        match self {
            AnyIndicator::WilliamsR(williams) => Some(williams.signal()),
            _ => None,
        }
    }
}
