//! Welles Wilder moving average (WWMA / RMA).
//!
//! Exponential smoothing with alpha = 1 / length, seeded from values[0].

use super::ema::ema_with_alpha;
use crate::domain::Line;

pub fn wwma(values: &[f64], length: usize) -> Line {
    if length == 0 {
        return vec![None; values.len()];
    }
    ema_with_alpha(values, 1.0 / length as f64)
}
