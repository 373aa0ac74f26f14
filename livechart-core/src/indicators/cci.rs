//! Commodity Channel Index (CCI).
//!
//! tp  = (high + low + close) / 3
//! CCI = (tp - SMA(tp, length)) / (0.015 * mean absolute deviation)
//! A zero mean deviation yields 0. First defined value at index length-1.

use super::sma::sma;
use crate::domain::Line;

const LAMBERT: f64 = 0.015;

pub fn cci(highs: &[f64], lows: &[f64], closes: &[f64], length: usize) -> Line {
    let typical: Vec<f64> = highs
        .iter()
        .zip(lows)
        .zip(closes)
        .map(|((h, l), c)| (h + l + c) / 3.0)
        .collect();

    sma(&typical, length)
        .iter()
        .enumerate()
        .map(|(i, mean)| {
            let mean = (*mean)?;
            let window = &typical[i + 1 - length..=i];
            let deviation = window.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / length as f64;
            Some(if deviation == 0.0 {
                0.0
            } else {
                (typical[i] - mean) / (LAMBERT * deviation)
            })
        })
        .collect()
}
