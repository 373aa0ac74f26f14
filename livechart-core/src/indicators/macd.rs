//! Moving Average Convergence Divergence (MACD).
//!
//! macd      = EMA(values, fast) - EMA(values, slow)
//! signal    = EMA(macd, signal_length)
//! histogram = macd - signal
//! All three lines are EMA-seeded and fully defined.

use super::ema::ema;
use super::{on_defined, zip_with};
use crate::domain::Line;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Line,
    pub signal: Line,
    pub histogram: Line,
}

pub fn macd(values: &[f64], fast: usize, slow: usize, signal_length: usize) -> MacdLines {
    let macd = zip_with(&ema(values, fast), &ema(values, slow), |f, s| f - s);
    let signal = on_defined(&macd, |v| ema(v, signal_length));
    let histogram = zip_with(&macd, &signal, |m, s| m - s);
    MacdLines {
        macd,
        signal,
        histogram,
    }
}
