//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR uses Wilder smoothing seeded with the simple mean of the first
//! `length` true ranges. TR[0] has no previous close and is left out of the
//! average, so the first ATR lands at index `length`.

use crate::domain::Line;

/// True Range series. TR[0] = high[0] - low[0].
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = highs.len().min(lows.len()).min(closes.len());
    let mut tr = Vec::with_capacity(n);
    for i in 0..n {
        let (h, l) = (highs[i], lows[i]);
        if i == 0 {
            tr.push(h - l);
        } else {
            let pc = closes[i - 1];
            tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
        }
    }
    tr
}

/// Wilder smoothing: mean of the first `length` values at index length-1,
/// then avg[i] = (avg[i-1] * (length - 1) + v[i]) / length.
pub fn wilder_smooth(values: &[f64], length: usize) -> Line {
    let n = values.len();
    let mut result = vec![None; n];

    if length == 0 || n < length {
        return result;
    }

    let len = length as f64;
    let mut avg = values[..length].iter().sum::<f64>() / len;
    result[length - 1] = Some(avg);
    for i in length..n {
        avg = (avg * (len - 1.0) + values[i]) / len;
        result[i] = Some(avg);
    }

    result
}

pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], length: usize) -> Line {
    let tr = true_range(highs, lows, closes);
    if tr.is_empty() {
        return Vec::new();
    }
    let mut result = vec![None];
    result.extend(wilder_smooth(&tr[1..], length));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, make_ohlc, DEFAULT_EPSILON};

    #[test]
    fn true_range_uses_previous_close() {
        // bar 1: h=12, l=11, prev close 9 → max(1, 3, 2) = 3
        let tr = true_range(&[10.0, 12.0], &[8.0, 11.0], &[9.0, 11.5]);
        assert_eq!(tr, vec![2.0, 3.0]);
    }

    #[test]
    fn wilder_smooth_known_values() {
        let result = wilder_smooth(&[2.0, 4.0, 6.0, 8.0], 3);
        assert!(result[1].is_none());
        assert_some_approx(result[2], 4.0, DEFAULT_EPSILON);
        // (4 * 2 + 8) / 3
        assert_some_approx(result[3], 16.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_first_value_at_length() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let (_, highs, lows, closes) = make_ohlc(&closes);
        let result = atr(&highs, &lows, &closes, 14);
        assert_eq!(result.len(), 20);
        assert!(result[..14].iter().all(Option::is_none));
        // each bar: open = prev close, close = open + 1, range (open-1, close+1) → TR = 3
        assert_some_approx(result[14], 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_empty() {
        assert!(atr(&[], &[], &[], 14).is_empty());
    }
}
