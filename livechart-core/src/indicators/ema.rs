//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[0] = values[0]; EMA[i] = k * values[i] + (1 - k) * EMA[i-1],
//! k = 2 / (length + 1).
//! Seeded from the first sample, so there is no warmup gap.

use crate::domain::Line;

pub fn ema(values: &[f64], length: usize) -> Line {
    if length == 0 {
        return vec![None; values.len()];
    }
    ema_with_alpha(values, 2.0 / (length as f64 + 1.0))
}

/// First-sample-seeded exponential smoothing with an explicit alpha.
/// Shared by EMA (2/(n+1)) and Wilder smoothing (1/n).
pub fn ema_with_alpha(values: &[f64], alpha: f64) -> Line {
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        result.push(Some(next));
        prev = Some(next);
    }
    result
}
