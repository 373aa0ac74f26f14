//! Moving Average Envelope.
//!
//! Middle = SMA(values, length); Upper/Lower = Middle * (1 +/- percent/100).

use super::sma::sma;
use super::BandLines;

pub fn envelope(values: &[f64], length: usize, percent: f64) -> BandLines {
    let middle = sma(values, length);
    let factor = percent / 100.0;
    BandLines {
        upper: middle.iter().map(|m| m.map(|m| m * (1.0 + factor))).collect(),
        lower: middle.iter().map(|m| m.map(|m| m * (1.0 - factor))).collect(),
        middle,
    }
}
