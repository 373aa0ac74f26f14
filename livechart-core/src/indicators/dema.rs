//! Double Exponential Moving Average (DEMA).
//!
//! DEMA = 2 * EMA(values) - EMA(EMA(values)).

use super::ema::ema;
use super::{on_defined, zip_with};
use crate::domain::Line;

pub fn dema(values: &[f64], length: usize) -> Line {
    let e1 = ema(values, length);
    let e2 = on_defined(&e1, |v| ema(v, length));
    zip_with(&e1, &e2, |a, b| 2.0 * a - b)
}
