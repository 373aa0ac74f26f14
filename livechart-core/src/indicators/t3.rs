//! Tillson T3.
//!
//! Six chained EMAs e1..e6 combined with volume-factor coefficients:
//!   c1 = -a^3
//!   c2 = 3a^2 + 3a^3
//!   c3 = -6a^2 - 3a - 3a^3
//!   c4 = 1 + 3a + a^3 + 3a^2
//!   T3 = c1*e6 + c2*e5 + c3*e4 + c4*e3
//! Every stage is first-sample seeded, so T3 has no leading `None`s.

use super::ema::ema;
use crate::domain::Line;

pub const DEFAULT_VOLUME_FACTOR: f64 = 0.7;

pub fn t3(values: &[f64], length: usize, volume_factor: f64) -> Line {
    if length == 0 {
        return vec![None; values.len()];
    }

    let stage = |input: &[f64]| -> Vec<f64> { ema(input, length).into_iter().flatten().collect() };
    let e1 = stage(values);
    let e2 = stage(&e1);
    let e3 = stage(&e2);
    let e4 = stage(&e3);
    let e5 = stage(&e4);
    let e6 = stage(&e5);

    let a = volume_factor;
    let a2 = a * a;
    let a3 = a2 * a;
    let c1 = -a3;
    let c2 = 3.0 * a2 + 3.0 * a3;
    let c3 = -6.0 * a2 - 3.0 * a - 3.0 * a3;
    let c4 = 1.0 + 3.0 * a + a3 + 3.0 * a2;

    (0..values.len())
        .map(|i| Some(c1 * e6[i] + c2 * e5[i] + c3 * e4[i] + c4 * e3[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_some_approx, DEFAULT_EPSILON};

    #[test]
    fn t3_coefficients_sum_to_one() {
        // c1 + c2 + c3 + c4 == 1 for any a, so a flat series is a fixed point.
        for v in t3(&[42.0; 30], 5, DEFAULT_VOLUME_FACTOR) {
            assert_some_approx(v, 42.0, 1e-9);
        }
    }

    #[test]
    fn t3_zero_volume_factor_is_triple_ema() {
        let values: Vec<f64> = (0..20).map(|i| (i as f64).sin() * 10.0 + 50.0).collect();
        let e = |v: &[f64]| -> Vec<f64> { ema(v, 4).into_iter().flatten().collect() };
        let e3 = e(&e(&e(&values)));
        let result = t3(&values, 4, 0.0);
        for i in 0..values.len() {
            assert_some_approx(result[i], e3[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn t3_aligned_with_input() {
        assert_eq!(t3(&[1.0, 2.0, 3.0], 8, 0.7).len(), 3);
        assert!(t3(&[], 8, 0.7).is_empty());
    }
}
