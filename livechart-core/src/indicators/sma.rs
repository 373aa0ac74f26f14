//! Simple Moving Average (SMA).
//!
//! Rolling mean over a `length`-sample window, maintained with a running sum.
//! First defined value at index length-1.

use crate::domain::Line;

pub fn sma(values: &[f64], length: usize) -> Line {
    let n = values.len();
    let mut result = vec![None; n];

    if length == 0 || n < length {
        return result;
    }

    let mut sum: f64 = values[..length].iter().sum();
    result[length - 1] = Some(sum / length as f64);

    for i in length..n {
        sum += values[i] - values[i - length];
        result[i] = Some(sum / length as f64);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_3_example() {
        assert_eq!(
            sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3),
            vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
        );
    }

    #[test]
    fn sma_5_basic() {
        let result = sma(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0], 5);
        assert_eq!(result.len(), 7);
        assert!(result[..4].iter().all(Option::is_none));
        // mean(10..=14) = 12, mean(11..=15) = 13, mean(12..=16) = 14
        assert_some_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_some_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_some_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        assert_eq!(sma(&[100.0, 200.0], 1), vec![Some(100.0), Some(200.0)]);
    }

    #[test]
    fn sma_too_few_values() {
        assert_eq!(sma(&[10.0, 11.0], 5), vec![None, None]);
    }

    #[test]
    fn sma_zero_length_is_all_none() {
        assert_eq!(sma(&[1.0, 2.0], 0), vec![None, None]);
    }
}
