//! Series math library.
//!
//! Pure, stateless functions over flat `f64` columns. Every function returns
//! output aligned with its input (`result.len() == values.len()`), with `None`
//! marking "insufficient history". Inputs are assumed finite: the series layer
//! filters malformed points before anything reaches this module.
//!
//! Recursive filters (EMA, WWMA, ZLEMA, DEMA, T3, VAR) seed from `values[0]`
//! and therefore have no leading `None`s. Window functions (SMA, WMA, TSF, ...)
//! start at index `length - 1`.
//!
//! Multi-series functions (Bollinger, Donchian, MACD, ...) return small named
//! structs instead of tuples.

pub mod adx;
pub mod ao;
pub mod aroon;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod dema;
pub mod donchian;
pub mod ema;
pub mod envelope;
pub mod heiken_ashi;
pub mod hull;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod t3;
pub mod tsf;
pub mod var;
pub mod williams;
pub mod wma;
pub mod wwma;
pub mod zlema;

pub use adx::{adx, Dmi};
pub use ao::awesome_oscillator;
pub use aroon::{aroon, AroonLines};
pub use atr::{atr, true_range, wilder_smooth};
pub use bollinger::bollinger;
pub use cci::cci;
pub use dema::dema;
pub use donchian::{donchian, donchian_mid};
pub use ema::{ema, ema_with_alpha};
pub use envelope::envelope;
pub use heiken_ashi::{heiken_ashi, HaCandles};
pub use hull::hma;
pub use macd::{macd, MacdLines};
pub use rsi::rsi;
pub use sma::sma;
pub use stochastic::{stochastic, StochasticLines};
pub use t3::{t3, DEFAULT_VOLUME_FACTOR};
pub use tsf::tsf;
pub use var::{var, CMO_WINDOW};
pub use williams::williams_r;
pub use wma::wma;
pub use wwma::wwma;
pub use zlema::zlema;

use crate::domain::Line;

/// Upper / middle / lower columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLines {
    pub upper: Line,
    pub middle: Line,
    pub lower: Line,
}

/// Apply `f` to the defined part of a line and pad the result back to full
/// length.
///
/// Lines produced here only ever have leading `None`s; an interior gap (only
/// possible with hand-built input) carries the previous value forward so the
/// wrapped function always sees finite numbers.
pub fn on_defined(input: &[Option<f64>], f: impl FnOnce(&[f64]) -> Line) -> Line {
    let n = input.len();
    let Some(start) = input.iter().position(Option::is_some) else {
        return vec![None; n];
    };

    let mut last = 0.0;
    let tail: Vec<f64> = input[start..]
        .iter()
        .map(|v| {
            if let Some(v) = v {
                last = *v;
            }
            last
        })
        .collect();

    let computed = f(&tail);
    debug_assert_eq!(computed.len(), tail.len());

    let mut result = vec![None; start];
    result.extend(computed);
    result
}

/// Element-wise combination of two lines; `None` if either side is `None`.
pub fn zip_with(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Line {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// Lift a plain column into a fully defined line.
pub fn defined(values: &[f64]) -> Line {
    values.iter().copied().map(Some).collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Assert a line slot is defined and approximately `expected`.
#[cfg(test)]
pub fn assert_some_approx(actual: Option<f64>, expected: f64, epsilon: f64) {
    match actual {
        Some(v) => assert_approx(v, expected, epsilon),
        None => panic!("expected Some({expected}), got None"),
    }
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Synthetic OHLC columns from closes: open = previous close,
/// high/low = max/min(open, close) +/- 1.
#[cfg(test)]
pub fn make_ohlc(closes: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut opens = Vec::with_capacity(closes.len());
    let mut highs = Vec::with_capacity(closes.len());
    let mut lows = Vec::with_capacity(closes.len());
    for (i, &close) in closes.iter().enumerate() {
        let open = if i == 0 { close } else { closes[i - 1] };
        opens.push(open);
        highs.push(open.max(close) + 1.0);
        lows.push(open.min(close) - 1.0);
    }
    (opens, highs, lows, closes.to_vec())
}
