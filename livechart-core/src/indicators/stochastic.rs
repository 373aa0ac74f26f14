//! Stochastic Oscillator (%K / %D).
//!
//! raw %K = 100 * (close - lowest low) / (highest high - lowest low)
//! over `k_length` bars; a zero range yields 50.
//! %K = SMA(raw, k_smooth); %D = SMA(%K, d_length).

use super::on_defined;
use super::sma::sma;
use crate::domain::Line;

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticLines {
    pub k: Line,
    pub d: Line,
}

pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_length: usize,
    k_smooth: usize,
    d_length: usize,
) -> StochasticLines {
    let n = highs.len().min(lows.len()).min(closes.len());
    let mut raw = vec![None; n];

    if k_length > 0 && n >= k_length {
        for i in (k_length - 1)..n {
            let start = i + 1 - k_length;
            let hh = highs[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let ll = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
            let range = hh - ll;
            raw[i] = Some(if range == 0.0 {
                50.0
            } else {
                100.0 * (closes[i] - ll) / range
            });
        }
    }

    let k = on_defined(&raw, |v| sma(v, k_smooth));
    let d = on_defined(&k, |v| sma(v, d_length));
    StochasticLines { k, d }
}
