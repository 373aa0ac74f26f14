//! Aroon Up / Down.
//!
//! Over a window of `length + 1` bars (current included):
//!   up   = 100 * (length - bars since highest high) / length
//!   down = 100 * (length - bars since lowest low)  / length
//! Ties resolve to the most recent extreme.
//! First defined value at index `length`.

use crate::domain::Line;

#[derive(Debug, Clone, PartialEq)]
pub struct AroonLines {
    pub up: Line,
    pub down: Line,
}

pub fn aroon(highs: &[f64], lows: &[f64], length: usize) -> AroonLines {
    let n = highs.len().min(lows.len());
    let mut up = vec![None; n];
    let mut down = vec![None; n];

    if length == 0 || n <= length {
        return AroonLines { up, down };
    }

    let len = length as f64;
    for i in length..n {
        let start = i - length;
        let (mut hi_idx, mut lo_idx) = (start, start);
        for j in start..=i {
            if highs[j] >= highs[hi_idx] {
                hi_idx = j;
            }
            if lows[j] <= lows[lo_idx] {
                lo_idx = j;
            }
        }
        up[i] = Some(100.0 * (len - (i - hi_idx) as f64) / len);
        down[i] = Some(100.0 * (len - (i - lo_idx) as f64) / len);
    }

    AroonLines { up, down }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, DEFAULT_EPSILON};

    #[test]
    fn aroon_new_high_is_100() {
        let highs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let lows = [0.0, 1.0, 2.0, 3.0, 4.0];
        let lines = aroon(&highs, &lows, 4);
        assert!(lines.up[3].is_none());
        assert_some_approx(lines.up[4], 100.0, DEFAULT_EPSILON);
        // lowest low was 4 bars ago
        assert_some_approx(lines.down[4], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn aroon_high_two_bars_ago() {
        let highs = [1.0, 9.0, 2.0, 3.0];
        let lows = [1.0, 1.0, 1.0, 1.0];
        let lines = aroon(&highs, &lows, 3);
        // high at index 1, current index 3 → 100 * (3 - 2) / 3
        assert_some_approx(lines.up[3], 100.0 / 3.0, DEFAULT_EPSILON);
        // flat lows tie to the current bar
        assert_some_approx(lines.down[3], 100.0, DEFAULT_EPSILON);
    }
}
