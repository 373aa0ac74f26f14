//! Hull Moving Average (HMA).
//!
//! HMA = WMA(2 * WMA(v, len/2) - WMA(v, len), floor(sqrt(len))).
//! Half and root lengths are floored and clamped to at least 1.

use super::wma::wma;
use super::{on_defined, zip_with};
use crate::domain::Line;

pub fn hma(values: &[f64], length: usize) -> Line {
    if length == 0 {
        return vec![None; values.len()];
    }
    let half = (length / 2).max(1);
    let root = ((length as f64).sqrt().floor() as usize).max(1);

    let raw = zip_with(&wma(values, half), &wma(values, length), |h, f| 2.0 * h - f);
    on_defined(&raw, |v| wma(v, root))
}
