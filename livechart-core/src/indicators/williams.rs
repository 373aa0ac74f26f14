//! Williams %R.
//!
//! %R = -100 * (highest high - close) / (highest high - lowest low)
//! over the last `length` bars. A zero range yields -50.
//! First defined value at index length-1; output in [-100, 0].

use crate::domain::Line;

pub fn williams_r(highs: &[f64], lows: &[f64], closes: &[f64], length: usize) -> Line {
    let n = highs.len().min(lows.len()).min(closes.len());
    let mut result = vec![None; n];

    if length == 0 || n < length {
        return result;
    }

    for i in (length - 1)..n {
        let start = i + 1 - length;
        let hh = highs[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let ll = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
        let range = hh - ll;
        result[i] = Some(if range == 0.0 {
            -50.0
        } else {
            -100.0 * (hh - closes[i]) / range
        });
    }

    result
}
