//! Reference series from published indicator test data.

mod common;

use approx::assert_abs_diff_eq;
use common::{decimal, high_low_candles, AC_HIGH_LOW, AO_EXPECTED, AO_HIGHS, AO_LOWS};
use rust_decimal::prelude::ToPrimitive;
use trading_indicators::{fast, precise, Candle, Indicator, IndicatorError, IndicatorSeries};

#[test]
fn test_ao_reference_series() {
    // Test data verified with:
    // https://github.com/TulipCharts/tulipindicators/blob/v0.8.0/tests/extra.txt#L17-L20
    let mut ao = fast::Ao::new(5, 34).unwrap();
    let results: Vec<f64> = ao
        .update_all(high_low_candles(&AO_HIGHS, &AO_LOWS))
        .into_iter()
        .flatten()
        .collect();

    assert_eq!(results.len(), AO_EXPECTED.len());
    for (actual, expected) in results.iter().zip(AO_EXPECTED) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 0.0001);
    }
    assert_eq!(ao.required_inputs(), 34);
    assert_abs_diff_eq!(ao.highest().unwrap(), 33.3549, epsilon = 0.0001);
    assert_abs_diff_eq!(ao.lowest().unwrap(), -11.4972, epsilon = 0.0001);
}

#[test]
fn test_ao_replace() {
    let mut ao = precise::Ao::new(5, 34).unwrap();
    for (high, low) in AO_HIGHS.iter().zip(AO_LOWS) {
        ao.add(Candle::hlc(decimal(*high), decimal(low), decimal(low)));
    }

    let latest = ao.add(Candle::hlc(decimal(9000.0), decimal(0.0), decimal(0.0)));
    assert_eq!(latest.unwrap().round_dp(2), decimal(749.69));

    let replaced = ao.replace(Candle::hlc(decimal(2000.0), decimal(-2000.0), decimal(0.0)));
    assert_eq!(replaced.unwrap().round_dp(2), decimal(-17.96));
    assert_eq!(ao.result().unwrap().round_dp(2), decimal(-17.96));
}

#[test]
fn test_ao_not_enough_data() {
    let ao = fast::Ao::new(5, 34).unwrap();
    assert_eq!(ao.result(), Err(IndicatorError::NotEnoughData { required: 34 }));
}

#[test]
fn test_ac_reference_series() {
    // Test data verified with:
    // https://github.com/jesse-ai/jesse/blob/8e502d070c24bed29db80e1d0938781d8cdb1046/tests/data/test_candles_indicators.py#L4351
    let mut fast_ac = fast::Ac::new(5, 34, 5).unwrap();
    let mut precise_ac = precise::Ac::new(5, 34, 5).unwrap();

    for (high, low) in AC_HIGH_LOW {
        fast_ac.add(Candle::hlc(high, low, low));
        precise_ac.add(Candle::hlc(decimal(high), decimal(low), decimal(low)));
    }

    assert!(fast_ac.is_stable());
    assert!(precise_ac.is_stable());

    assert_abs_diff_eq!(fast_ac.result().unwrap(), -21.97, epsilon = 0.005);
    assert_abs_diff_eq!(fast_ac.momentum().unwrap(), -9.22, epsilon = 0.005);
    assert_abs_diff_eq!(fast_ac.lowest().unwrap(), -21.97, epsilon = 0.005);
    assert_abs_diff_eq!(fast_ac.highest().unwrap(), 11.65, epsilon = 0.005);

    assert_eq!(precise_ac.result().unwrap().round_dp(2), decimal(-21.97));
    assert_eq!(precise_ac.momentum().unwrap().round_dp(2), decimal(-9.22));
    assert_eq!(precise_ac.highest().unwrap().round_dp(2), decimal(11.65));
}

#[test]
fn test_ac_warm_up() {
    let mut ac = fast::Ac::new(5, 34, 5).unwrap();
    let results = ac.update_all(AC_HIGH_LOW.iter().map(|&(high, low)| Candle::hlc(high, low, low)));

    let first = results.iter().position(Option::is_some).unwrap();
    assert_eq!(first + 1, ac.required_inputs());
    assert_eq!(ac.required_inputs(), 38);
}

#[test]
fn test_obv_precise_matches_fast() {
    let closes = [10.0, 10.15, 10.17, 10.13, 10.11, 10.15, 10.2, 10.2, 10.22, 10.21];
    let volumes = [25200.0, 30000.0, 25600.0, 32000.0, 23000.0, 40000.0, 36000.0, 20500.0, 23000.0, 27500.0];

    let mut fast_obv = fast::Obv::new();
    let mut precise_obv = precise::Obv::new();
    for (close, volume) in closes.into_iter().zip(volumes) {
        let fast = fast_obv.add(Candle::hlc(close, close, close).with_volume(volume));
        let precise = precise_obv.add(
            Candle::hlc(decimal(close), decimal(close), decimal(close)).with_volume(decimal(volume)),
        );
        assert_eq!(fast, precise.and_then(|value| value.to_f64()));
    }

    assert_eq!(fast_obv.result(), Ok(72100.0));
}
