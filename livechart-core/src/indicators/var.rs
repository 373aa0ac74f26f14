//! Variable Index Dynamic Average (VAR / VIDYA).
//!
//! An EMA whose smoothing constant is scaled by the absolute Chande Momentum
//! Oscillator over the last `CMO_WINDOW` changes:
//!   alpha = 2 / (length + 1)
//!   VAR[0] = v[0]
//!   VAR[i] = alpha*|cmo| * v[i] + (1 - alpha*|cmo|) * VAR[i-1]
//! CMO is 0 until a full window of changes exists, or when the window is flat.

use crate::domain::Line;

/// Lookback of the momentum oscillator that drives the adaptive alpha.
pub const CMO_WINDOW: usize = 9;

pub fn var(values: &[f64], length: usize) -> Line {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    if length == 0 {
        return vec![None; n];
    }

    let alpha = 2.0 / (length as f64 + 1.0);
    let mut result = Vec::with_capacity(n);
    let mut prev = values[0];
    result.push(Some(prev));

    for i in 1..n {
        let k = alpha * cmo(values, i).abs();
        prev = k * values[i] + (1.0 - k) * prev;
        result.push(Some(prev));
    }

    result
}

/// CMO in [-1, 1] over the `CMO_WINDOW` changes ending at `i`.
fn cmo(values: &[f64], i: usize) -> f64 {
    if i < CMO_WINDOW {
        return 0.0;
    }
    let (mut up, mut down) = (0.0, 0.0);
    for j in (i + 1 - CMO_WINDOW)..=i {
        let diff = values[j] - values[j - 1];
        if diff > 0.0 {
            up += diff;
        } else {
            down -= diff;
        }
    }
    let total = up + down;
    if total == 0.0 {
        0.0
    } else {
        (up - down) / total
    }
}
