//! Time Series Forecast (TSF).
//!
//! Least-squares line over each trailing window (x = 0..length-1), projected
//! one step past the window end: a + b * length.
//! First defined value at index length-1. A one-sample window has no slope
//! and forecasts its own value.

use crate::domain::Line;

pub fn tsf(values: &[f64], length: usize) -> Line {
    let n = values.len();
    let mut result = vec![None; n];

    if length == 0 || n < length {
        return result;
    }

    let len = length as f64;
    let sum_x = len * (len - 1.0) / 2.0;
    let sum_x2 = (len - 1.0) * len * (2.0 * len - 1.0) / 6.0;
    let denom = len * sum_x2 - sum_x * sum_x;

    for i in (length - 1)..n {
        let window = &values[i + 1 - length..=i];
        let sum_y: f64 = window.iter().sum();
        let sum_xy: f64 = window.iter().enumerate().map(|(x, y)| x as f64 * y).sum();

        let slope = if denom == 0.0 {
            0.0
        } else {
            (len * sum_xy - sum_x * sum_y) / denom
        };
        let intercept = (sum_y - slope * sum_x) / len;
        result[i] = Some(intercept + slope * len);
    }

    result
}
