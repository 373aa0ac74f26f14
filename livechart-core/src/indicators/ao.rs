//! Awesome Oscillator (AO).
//!
//! AO = SMA(median, 5) - SMA(median, 34), median = (high + low) / 2.
//! First defined value at index 33.

use super::sma::sma;
use super::zip_with;
use crate::domain::Line;

const FAST: usize = 5;
const SLOW: usize = 34;

pub fn awesome_oscillator(highs: &[f64], lows: &[f64]) -> Line {
    let median: Vec<f64> = highs.iter().zip(lows).map(|(h, l)| (h + l) / 2.0).collect();
    zip_with(&sma(&median, FAST), &sma(&median, SLOW), |f, s| f - s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, DEFAULT_EPSILON};

    #[test]
    fn ao_warmup() {
        let highs = vec![11.0; 40];
        let lows = vec![9.0; 40];
        let result = awesome_oscillator(&highs, &lows);
        assert!(result[..33].iter().all(Option::is_none));
        assert_some_approx(result[33], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ao_positive_when_accelerating_up() {
        let highs: Vec<f64> = (0..40).map(|i| i as f64 + 1.0).collect();
        let lows: Vec<f64> = (0..40).map(|i| i as f64 - 1.0).collect();
        assert!(awesome_oscillator(&highs, &lows)[39].unwrap() > 0.0);
    }
}
