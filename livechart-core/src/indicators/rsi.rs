//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and average losses:
//!   seed    = simple mean of the first `length` changes
//!   avg[i]  = (avg[i-1] * (length - 1) + change[i]) / length
//!   RSI     = 100 - 100 / (1 + avg_gain / avg_loss)
//! First defined value at index `length` (needs length+1 samples).
//! avg_loss == 0 → 100; the output never leaves [0, 100].

use crate::domain::Line;

pub fn rsi(values: &[f64], length: usize) -> Line {
    let n = values.len();
    let mut result = vec![None; n];

    if length == 0 || n <= length {
        return result;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=length {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= length as f64;
    avg_loss /= length as f64;
    result[length] = Some(rsi_value(avg_gain, avg_loss));

    let len = length as f64;
    for i in (length + 1)..n {
        let change = values[i] - values[i - 1];
        let (gain, loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };
        avg_gain = (avg_gain * (len - 1.0) + gain) / len;
        avg_loss = (avg_loss * (len - 1.0) + loss) / len;
        result[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_first_value_at_length() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + ((i * 7) % 5) as f64).collect();
        let result = rsi(&values, 4);
        assert!(result[..4].iter().all(Option::is_none));
        assert!(result[4..].iter().all(Option::is_some));
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        for v in rsi(&values, 14).into_iter().flatten() {
            assert_eq!(v, 100.0);
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let values: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        for v in rsi(&values, 14).into_iter().flatten() {
            assert_some_approx(Some(v), 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rsi_known_seed() {
        // changes: +2, -1, +1, -2 → gain 3/4, loss 3/4 → RSI 50
        let result = rsi(&[10.0, 12.0, 11.0, 12.0, 10.0], 4);
        assert_some_approx(result[4], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_flat_series_is_100() {
        assert_eq!(rsi(&[5.0; 6], 3)[5], Some(100.0));
    }

    #[test]
    fn rsi_too_short() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 3), vec![None, None, None]);
    }
}
