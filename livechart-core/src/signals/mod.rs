//! Pattern / signal engines.
//!
//! Each engine is a pure function of a series snapshot and its parameters:
//! derived columns are computed up front, then a single bar loop decides
//! which bars emit. Any state carried between bars (the engulfing engine's
//! last emitted direction) lives in the loop accumulator, so two symbols
//! computed side by side can never interfere.

pub mod engulfing;
pub mod ha_baseline;

pub use engulfing::{engulfing_signals, EngulfingParams, RewardRatio};
pub use ha_baseline::{ha_baseline_signals, HaBaselineParams};

use crate::domain::Series;

/// OHLC columns of a series snapshot. Line-only points project to flat
/// candles.
#[derive(Debug, Clone, Default)]
pub(crate) struct Columns {
    pub times: Vec<i64>,
    pub opens: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
}

impl Columns {
    pub fn of(series: &Series) -> Self {
        let mut cols = Self::default();
        for p in series.points() {
            let (o, h, l, c) = p.ohlc();
            cols.times.push(p.time);
            cols.opens.push(o);
            cols.highs.push(h);
            cols.lows.push(l);
            cols.closes.push(c);
        }
        cols
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }
}

/// Round up to `decimals` places. Binary noise just above an exact tick
/// (1.1 * 100 = 110.00000000000001) does not bump the value a whole tick.
pub fn ceil_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let nearest = scaled.round();
    let ticks = if (scaled - nearest).abs() < 1e-9 {
        nearest
    } else {
        scaled.ceil()
    };
    ticks / factor
}
