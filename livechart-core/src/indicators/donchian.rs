//! Donchian Channel.
//!
//! Upper = highest high over the last `length` bars (current bar included).
//! Lower = lowest low over the same window. Middle = (upper + lower) / 2.
//! First defined value at index length-1.
//!
//! The midpoint alone is the Ichimoku Kijun-sen when length = 26.

use super::BandLines;
use crate::domain::Line;

pub fn donchian(highs: &[f64], lows: &[f64], length: usize) -> BandLines {
    let n = highs.len().min(lows.len());
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];
    let mut middle = vec![None; n];

    if length > 0 && n >= length {
        for i in (length - 1)..n {
            let start = i + 1 - length;
            let hi = highs[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let lo = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
            upper[i] = Some(hi);
            lower[i] = Some(lo);
            middle[i] = Some((hi + lo) / 2.0);
        }
    }

    BandLines {
        upper,
        middle,
        lower,
    }
}

/// Donchian midpoint only.
pub fn donchian_mid(highs: &[f64], lows: &[f64], length: usize) -> Line {
    donchian(highs, lows, length).middle
}
