//! Zero-Lag Exponential Moving Average (ZLEMA).
//!
//! De-lags the input before smoothing:
//! lag = floor((length - 1) / 2); adj[i] = v[i] + (v[i] - v[i - lag]),
//! then EMA(adj, length). Samples before `lag` pass through unadjusted.

use super::ema::ema;
use crate::domain::Line;

pub fn zlema(values: &[f64], length: usize) -> Line {
    let lag = length.saturating_sub(1) / 2;
    let adjusted: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| if i >= lag { v + (v - values[i - lag]) } else { v })
        .collect();
    ema(&adjusted, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, DEFAULT_EPSILON};

    #[test]
    fn zlema_length_2_has_no_lag_adjustment() {
        // lag = 0 → adj == values → plain EMA
        let values = [1.0, 4.0, 2.0, 8.0];
        assert_eq!(zlema(&values, 2), ema(&values, 2));
    }

    #[test]
    fn zlema_adjusts_by_lag() {
        // length 5 → lag 2, k = 1/3
        // adj = [1, 2, 3+2=5, 4+2=6]
        let result = zlema(&[1.0, 2.0, 3.0, 4.0], 5);
        let k = 2.0 / 6.0;
        let e1 = k * 2.0 + (1.0 - k) * 1.0;
        let e2 = k * 5.0 + (1.0 - k) * e1;
        let e3 = k * 6.0 + (1.0 - k) * e2;
        assert_some_approx(result[0], 1.0, DEFAULT_EPSILON);
        assert_some_approx(result[3], e3, DEFAULT_EPSILON);
    }

    #[test]
    fn zlema_leads_ema_on_trend() {
        let values: Vec<f64> = (0..40).map(|i| i as f64).collect();
        assert!(zlema(&values, 10)[39].unwrap() > ema(&values, 10)[39].unwrap());
    }
}
