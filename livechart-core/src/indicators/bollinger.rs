//! Bollinger Bands.
//!
//! Middle = SMA(values, length)
//! Upper  = Middle + multiplier * stddev
//! Lower  = Middle - multiplier * stddev
//! stddev is the population standard deviation of the window.
//! First defined value at index length-1.

use super::sma::sma;
use super::BandLines;

pub fn bollinger(values: &[f64], length: usize, multiplier: f64) -> BandLines {
    let n = values.len();
    let middle = sma(values, length);
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];

    for (i, mid) in middle.iter().enumerate() {
        let Some(mean) = *mid else { continue };
        let window = &values[i + 1 - length..=i];
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / length as f64;
        let width = multiplier * variance.sqrt();
        upper[i] = Some(mean + width);
        lower[i] = Some(mean - width);
    }

    BandLines {
        upper,
        middle,
        lower,
    }
}
