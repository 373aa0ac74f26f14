//! Heiken-Ashi / baseline divergence engine.
//!
//! Per bar `i` (derived columns computed once up front):
//! - HA candles from the raw OHLC
//! - trend filter: EMA(close, `ema_length`), 200 by default
//! - baseline: Donchian midpoint over `baseline_length` (Kijun-sen, 26)
//! - slope: baseline[i] - baseline[i - slope_lookback]
//!
//! Long when the HA close is above the baseline, the HA candle is bullish with
//! an upper wick of at least `min_wick_ratio` x body, the raw close is above
//! the trend EMA (unless the filter is off) and the slope is positive. Short
//! mirrors every leg. A zero slope disqualifies both sides, and bar 0 never
//! emits.
//!
//! Exit levels: long tp = close + ATR * tp_multiplier, sl = close - ATR *
//! sl_multiplier; short mirrored. Without an ATR value yet, the signal is
//! still emitted with no levels.

use tracing::debug;

use super::Columns;
use crate::domain::{Series, Signal, SignalDirection};
use crate::indicators::{atr, donchian_mid, ema, heiken_ashi, HaCandles};

#[derive(Debug, Clone, PartialEq)]
pub struct HaBaselineParams {
    pub ema_length: usize,
    pub baseline_length: usize,
    pub slope_lookback: usize,
    pub min_wick_ratio: f64,
    pub use_trend_filter: bool,
    pub atr_length: usize,
    pub tp_multiplier: f64,
    pub sl_multiplier: f64,
}

impl Default for HaBaselineParams {
    fn default() -> Self {
        Self {
            ema_length: 200,
            baseline_length: 26,
            slope_lookback: 3,
            min_wick_ratio: 0.5,
            use_trend_filter: true,
            atr_length: 14,
            tp_multiplier: 2.0,
            sl_multiplier: 1.5,
        }
    }
}

pub fn ha_baseline_signals(series: &Series, params: &HaBaselineParams) -> Vec<Signal> {
    let cols = Columns::of(series);
    let n = cols.len();
    if n < 2 {
        return Vec::new();
    }

    let ha = heiken_ashi(&cols.opens, &cols.highs, &cols.lows, &cols.closes);
    let trend = ema(&cols.closes, params.ema_length);
    let baseline = donchian_mid(&cols.highs, &cols.lows, params.baseline_length);
    let atr = atr(&cols.highs, &cols.lows, &cols.closes, params.atr_length);
    let lookback = params.slope_lookback.max(1);

    let mut signals = Vec::new();
    for i in 1..n {
        let Some(base) = baseline[i] else { continue };
        let Some(slope) = i
            .checked_sub(lookback)
            .and_then(|j| baseline[j])
            .map(|prev| base - prev)
        else {
            continue;
        };
        let close = cols.closes[i];
        let trend_up = !params.use_trend_filter || trend[i].is_some_and(|t| close > t);
        let trend_down = !params.use_trend_filter || trend[i].is_some_and(|t| close < t);

        let direction = if ha.close[i] > base
            && ha.is_bullish(i)
            && upper_wick_ratio(&ha, i) >= params.min_wick_ratio
            && trend_up
            && slope > 0.0
        {
            SignalDirection::Long
        } else if ha.close[i] < base
            && ha.is_bearish(i)
            && lower_wick_ratio(&ha, i) >= params.min_wick_ratio
            && trend_down
            && slope < 0.0
        {
            SignalDirection::Short
        } else {
            continue;
        };

        let (tp, sl) = match (atr[i], direction) {
            (Some(a), SignalDirection::Long) => (
                Some(close + a * params.tp_multiplier),
                Some(close - a * params.sl_multiplier),
            ),
            (Some(a), SignalDirection::Short) => (
                Some(close - a * params.tp_multiplier),
                Some(close + a * params.sl_multiplier),
            ),
            (None, _) => (None, None),
        };

        signals.push(Signal {
            index: i,
            time: cols.times[i],
            direction,
            price: close,
            tp,
            sl,
        });
    }

    debug!(bars = n, signals = signals.len(), "ha_baseline pass");
    signals
}

fn body(ha: &HaCandles, i: usize) -> f64 {
    (ha.close[i] - ha.open[i]).abs()
}

fn upper_wick_ratio(ha: &HaCandles, i: usize) -> f64 {
    let body = body(ha, i);
    if body == 0.0 {
        return 0.0;
    }
    (ha.high[i] - ha.close[i].max(ha.open[i])) / body
}

fn lower_wick_ratio(ha: &HaCandles, i: usize) -> f64 {
    let body = body(ha, i);
    if body == 0.0 {
        return 0.0;
    }
    (ha.close[i].min(ha.open[i]) - ha.low[i]) / body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;

    /// Steady trend: open = previous close, close = open + step,
    /// one point of wick above and below the body.
    fn trending(n: usize, step: f64) -> Series {
        let mut prev = 1_000.0;
        (0..n)
            .map(|i| {
                let open = prev;
                let close = open + step;
                prev = close;
                PricePoint::candle(i as i64, open, open.max(close) + 1.0, open.min(close) - 1.0, close)
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn uptrend_emits_longs_only() {
        let signals = ha_baseline_signals(&trending(260, 1.0), &HaBaselineParams::default());
        assert!(!signals.is_empty());
        for s in &signals {
            assert!(s.is_long());
            assert!(s.index >= 28, "baseline + slope warmup, got {}", s.index);
            let (tp, sl) = (s.tp.unwrap(), s.sl.unwrap());
            assert!(tp > s.price && sl < s.price);
        }
    }

    #[test]
    fn downtrend_emits_shorts_only() {
        let signals = ha_baseline_signals(&trending(260, -1.0), &HaBaselineParams::default());
        assert!(!signals.is_empty());
        for s in &signals {
            assert!(s.is_short());
            assert!(s.tp.unwrap() < s.price && s.sl.unwrap() > s.price);
        }
    }

    #[test]
    fn flat_baseline_never_emits() {
        let flat: Series = (0..100)
            .map(|i| PricePoint::candle(i, 10.0, 11.0, 9.0, 10.0))
            .collect::<Vec<_>>()
            .into();
        assert!(ha_baseline_signals(&flat, &HaBaselineParams::default()).is_empty());
    }

    #[test]
    fn trend_filter_blocks_counter_trend_longs() {
        // Long decline then a short rally: the rally sits below EMA(200).
        let mut points: Vec<PricePoint> = trending(240, -1.0).points().to_vec();
        let mut prev = points.last().unwrap().close.unwrap();
        for i in 240..270 {
            let open = prev;
            let close = open + 1.0;
            prev = close;
            points.push(PricePoint::candle(i, open, close + 1.0, open - 1.0, close));
        }
        let series = Series::from_points(points);

        let filtered = ha_baseline_signals(&series, &HaBaselineParams::default());
        assert!(filtered.iter().all(|s| s.index < 240 || !s.is_long()));

        let unfiltered = ha_baseline_signals(
            &series,
            &HaBaselineParams {
                use_trend_filter: false,
                ..HaBaselineParams::default()
            },
        );
        assert!(unfiltered.iter().any(|s| s.index >= 240 && s.is_long()));
    }

    #[test]
    fn tiny_series_is_silent() {
        assert!(ha_baseline_signals(&trending(1, 1.0), &HaBaselineParams::default()).is_empty());
    }
}
