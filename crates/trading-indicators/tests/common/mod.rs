//! Shared market data for the integration tests.

#![allow(dead_code)]

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use trading_indicators::Candle;

/// Closing prices of the Tulip Indicators reference series.
pub const PRICES: [f64; 15] = [
    81.59, 81.06, 82.87, 83.0, 83.61, 83.15, 82.84, 83.99,
    84.55, 84.36, 85.53, 86.54, 86.89, 87.77, 87.29,
];

/// (close, high, low) of the Tulip Indicators reference series.
pub const CANDLES: [(f64, f64, f64); 15] = [
    (81.59, 82.15, 81.29), (81.06, 81.89, 80.64), (82.87, 83.03, 81.31),
    (83.0, 83.3, 82.65), (83.61, 83.85, 83.07), (83.15, 83.9, 83.11),
    (82.84, 83.33, 82.49), (83.99, 84.3, 82.3), (84.55, 84.84, 84.15),
    (84.36, 85.0, 84.11), (85.53, 85.9, 84.03), (86.54, 86.58, 85.39),
    (86.89, 86.98, 85.76), (87.77, 88.0, 87.17), (87.29, 87.87, 87.01),
];

/// Highs of the Tulip Indicators AO(5, 34) reference series.
pub const AO_HIGHS: [f64; 99] = [
    32.11, 27.62, 28.26, 28.02, 26.93, 26.65, 27.25, 27.58,
    27.9, 28.9, 29.34, 29.82, 29.54, 29.3, 29.5, 29.5,
    29.7, 29.14, 27.17, 30.34, 30.26, 30.14, 29.98, 30.55,
    32.11, 34.16, 39.5, 50.78, 51.38, 51.34, 50.7, 44.23,
    42.71, 39.82, 42.35, 44.71, 44.27, 43.67, 44.83, 44.55,
    46.8, 46.24, 45.52, 44.55, 46.12, 44.71, 44.47, 45.28,
    44.63, 43.43, 46.24, 49.13, 49.93, 49.93, 51.38, 52.78,
    50.53, 50.61, 49.33, 49.41, 53.3, 52.58, 62.3, 61.57,
    62.54, 64.54, 74.14, 73.17, 70.12, 68.64, 71.77, 70.64,
    71.77, 104.04, 103.4, 97.62, 98.9, 99.46, 89.23, 87.34,
    82.28, 78.99, 81.56, 78.03, 73.86, 77.67, 79.47, 77.71,
    76.75, 78.31, 77.71, 72.25, 68.08, 66.31, 65.75, 64.14,
    67.43, 80.28, 78.35,
];

/// Lows of the Tulip Indicators AO(5, 34) reference series.
pub const AO_LOWS: [f64; 99] = [
    25.69, 25.57, 25.73, 25.69, 25.69, 26.17, 26.05, 26.29,
    26.89, 27.74, 28.46, 29.02, 28.46, 28.78, 29.06, 28.74,
    28.5, 27.01, 26.33, 26.97, 29.18, 29.62, 29.54, 29.74,
    30.47, 31.83, 34.64, 40.42, 47.68, 48.97, 43.27, 41.58,
    38.73, 37.33, 37.89, 43.39, 42.67, 41.14, 42.39, 43.03,
    43.75, 44.83, 43.35, 42.67, 43.67, 42.67, 43.59, 43.19,
    43.31, 41.58, 42.55, 45.96, 47.4, 48.17, 48.97, 50.25,
    48.61, 48.37, 48.05, 48.05, 49.17, 50.98, 49.85, 56.56,
    57.8, 58.84, 64.54, 66.31, 63.1, 65.06, 66.95, 65.83,
    67.39, 72.25, 84.13, 89.91, 93.12, 89.91, 83.17, 76.34,
    72.73, 71.93, 75.86, 72.57, 67.91, 70.04, 75.14, 74.66,
    72.69, 72.89, 70.64, 63.66, 57.8, 58.92, 52.66, 57.88,
    62.34, 68.76, 67.67,
];

/// Expected AO(5, 34), starting with the 34th candle.
pub const AO_EXPECTED: [f64; 66] = [
    11.6905, 9.3535, 8.2531, 7.8816, 7.7612, 8.2594, 8.4822, 8.1794,
    8.0454, 7.9502, 7.5005, 7.251, 6.5143, 5.7713, 5.2844, 4.9243,
    4.0526, 3.7438, 3.8741, 4.1156, 4.5317, 5.4641, 6.2518, 6.0741,
    5.6701, 5.0864, 4.3346, 3.862, 4.1222, 5.2467, 7.0596, 8.9599,
    10.4984, 13.1686, 14.985, 15.7149, 16.3803, 17.1528, 16.1721, 15.3763,
    18.3787, 22.3355, 25.798, 29.8361, 33.3549, 31.751, 28.244, 24.0074,
    18.979, 14.7623, 11.6177, 8.6476, 7.1438, 6.6704, 5.3673, 4.5294,
    4.764, 4.1044, 1.6913, -1.3769, -4.2062, -7.7196, -10.6241, -11.4972,
    -9.6358, -7.9344,
];

/// (high, low) of daily candles used for the AC(5, 34, 5) reference values.
pub const AC_HIGH_LOW: [(f64, f64); 239] = [
    (229.65, 205.71), (226.23, 212.52), (235.09, 219.78), (229.66, 216.99),
    (228.34, 212.25), (219.55, 208.36), (218.28, 202.0), (225.12, 215.23),
    (220.0, 212.71), (223.3, 203.0), (213.52, 198.24), (215.83, 206.59),
    (214.36, 204.4), (218.79, 209.2), (219.39, 210.54), (222.18, 214.31),
    (224.51, 216.62), (223.34, 216.9), (236.25, 221.79), (239.15, 223.03),
    (231.25, 220.95), (228.5, 215.51), (221.79, 207.3), (215.0, 202.6),
    (216.94, 206.14), (216.81, 209.75), (214.3, 204.0), (209.9, 183.49),
    (189.95, 181.23), (188.39, 178.04), (187.0, 181.83), (197.91, 183.35),
    (203.59, 192.7), (202.75, 194.45), (197.2, 179.53), (195.14, 182.8),
    (196.19, 188.16), (194.09, 185.63), (192.4, 182.8), (193.7, 186.0),
    (189.49, 184.75), (188.25, 166.48), (173.5, 163.61), (170.77, 165.55),
    (174.98, 165.63), (173.42, 167.61), (181.0, 170.02), (183.0, 174.09),
    (180.14, 173.0), (176.19, 168.1), (177.87, 165.0), (180.8, 168.3),
    (184.18, 176.13), (185.38, 176.01), (184.36, 177.0), (182.8, 173.0),
    (182.38, 176.62), (181.38, 177.54), (188.79, 179.75), (190.45, 185.76),
    (199.44, 188.3), (215.13, 195.74), (217.27, 207.66), (223.94, 202.3),
    (221.54, 212.05), (221.5, 213.2), (215.61, 206.1), (211.68, 198.65),
    (202.98, 150.03), (174.85, 161.88), (171.01, 152.11), (176.72, 161.03),
    (175.49, 168.0), (174.5, 164.12), (181.24, 165.01), (185.53, 173.19),
    (181.29, 173.65), (180.72, 169.55), (178.98, 170.74), (176.71, 172.02),
    (177.04, 167.68), (182.32, 168.68), (184.87, 177.0), (195.53, 178.96),
    (194.2, 186.88), (196.65, 179.41), (184.64, 177.59), (184.95, 178.52),
    (187.54, 180.43), (188.37, 175.96), (181.44, 171.81), (178.96, 172.61),
    (177.44, 168.66), (174.98, 169.44), (176.88, 169.21), (177.9, 171.59),
    (175.04, 170.3), (171.49, 153.45), (163.72, 158.72), (187.78, 160.25),
    (197.74, 173.8), (188.7, 176.22), (189.48, 180.35), (192.74, 181.26),
    (191.71, 179.28), (185.27, 177.66), (184.5, 177.02), (186.0, 181.53),
    (184.7, 178.95), (188.64, 180.36), (192.51, 182.22), (195.09, 187.72),
    (192.27, 184.59), (188.26, 181.41), (185.79, 182.63), (191.58, 183.3),
    (190.19, 184.06), (187.65, 182.41), (189.66, 185.3), (188.72, 183.34),
    (186.7, 177.67), (183.46, 179.3), (186.09, 180.0), (184.06, 175.01),
    (178.52, 172.65), (177.41, 173.5), (175.85, 157.26), (162.79, 138.0),
    (154.33, 146.11), (152.86, 138.62), (151.5, 131.45), (149.97, 143.37),
    (155.54, 140.84), (154.63, 149.09), (157.6, 150.23), (155.25, 149.7),
    (152.49, 145.79), (151.42, 146.71), (149.93, 145.77), (151.98, 143.15),
    (149.02, 143.64), (149.77, 145.74), (149.49, 146.85), (151.62, 146.11),
    (151.19, 146.56), (148.57, 143.81), (146.34, 142.12), (145.85, 139.24),
    (146.0, 142.8), (145.07, 141.18), (144.12, 139.92), (142.72, 127.93),
    (132.98, 119.11), (134.87, 116.26), (134.0, 125.69), (129.39, 125.84),
    (128.4, 126.5), (133.07, 126.82), (135.1, 126.0), (129.69, 126.61),
    (127.84, 123.07), (132.26, 124.32), (127.1, 121.91), (129.68, 125.84),
    (138.07, 127.52), (136.24, 130.3), (133.68, 128.17), (133.05, 128.68),
    (130.78, 126.38), (135.14, 125.88), (135.85, 132.5), (138.19, 134.19),
    (144.41, 134.86), (145.31, 138.76), (147.77, 137.03), (141.5, 135.3),
    (145.17, 135.32), (148.05, 142.09), (146.6, 141.76), (147.0, 142.27),
    (171.7, 143.51), (171.98, 159.2), (167.4, 157.8), (174.81, 162.14),
    (179.5, 164.92), (178.05, 161.66), (169.33, 161.24), (170.32, 164.8),
    (171.47, 166.03), (168.2, 159.21), (164.45, 155.55), (162.79, 157.61),
    (168.08, 159.41), (172.56, 165.22), (176.2, 170.03), (178.45, 173.33),
    (187.0, 170.93), (185.82, 175.22), (184.28, 179.23), (193.43, 179.1),
    (195.19, 186.62), (191.6, 184.69), (207.61, 188.19), (216.33, 201.02),
    (225.0, 213.14), (227.75, 213.22), (230.65, 222.86), (229.4, 216.37),
    (239.15, 218.17), (275.34, 236.69), (277.69, 256.08), (287.15, 260.28),
    (288.41, 261.86), (274.0, 237.41), (268.77, 242.0), (285.88, 258.0),
    (285.0, 251.56), (264.33, 245.34), (268.24, 253.61), (266.81, 256.0),
    (275.68, 261.02), (277.2, 257.09), (266.22, 244.44), (250.32, 215.66),
    (238.3, 210.0), (234.67, 214.01), (233.0, 217.0), (227.89, 212.36),
    (234.4, 216.07), (232.46, 219.57), (228.85, 220.23), (234.09, 224.23),
    (245.16, 227.33), (251.93, 236.0), (237.23, 195.5), (208.62, 190.0),
    (206.2, 195.54), (203.18, 181.73), (195.55, 101.2),
];

pub fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).expect("fixture values are finite")
}

pub fn fast_candles() -> Vec<Candle<f64>> {
    CANDLES
        .iter()
        .map(|&(close, high, low)| Candle::hlc(high, low, close))
        .collect()
}

pub fn precise_candles() -> Vec<Candle<Decimal>> {
    CANDLES
        .iter()
        .map(|&(close, high, low)| Candle::hlc(decimal(high), decimal(low), decimal(close)))
        .collect()
}

pub fn precise_prices() -> Vec<Decimal> {
    PRICES.iter().copied().map(decimal).collect()
}

/// Candles without a close for median-price indicators.
pub fn high_low_candles(highs: &[f64], lows: &[f64]) -> Vec<Candle<f64>> {
    highs
        .iter()
        .zip(lows)
        .map(|(&high, &low)| Candle::hlc(high, low, (high + low) / 2.0))
        .collect()
}
