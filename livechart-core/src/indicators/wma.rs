//! Weighted Moving Average (WMA).
//!
//! Linear weights over the trailing window: the newest sample weighs `length`,
//! the oldest weighs 1. Divisor: length * (length + 1) / 2.
//! First defined value at index length-1.

use crate::domain::Line;

pub fn wma(values: &[f64], length: usize) -> Line {
    let n = values.len();
    let mut result = vec![None; n];

    if length == 0 || n < length {
        return result;
    }

    let denom = (length * (length + 1)) as f64 / 2.0;

    for i in (length - 1)..n {
        let window = &values[i + 1 - length..=i];
        let weighted: f64 = window
            .iter()
            .enumerate()
            .map(|(j, v)| v * (j + 1) as f64)
            .sum();
        result[i] = Some(weighted / denom);
    }

    result
}
