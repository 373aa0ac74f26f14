//! Property tests for the series math library and the pattern engines.
//!
//! Uses proptest to verify:
//! 1. SMA equals the window mean, with `None` before the window fills
//! 2. EMA follows its recurrence
//! 3. RSI stays in [0, 100] and never produces NaN
//! 4. MACD histogram = macd - signal
//! 5. Heiken-Ashi open seed and recurrence
//! 6. Engulfing engine with repeat suppression never emits the same
//!    direction twice in a row
//! 7. Every catalog output is aligned with its input series

use proptest::prelude::*;

use livechart_core::catalog::compute_indicator;
use livechart_core::domain::{
    IndicatorDescriptor, IndicatorOutput, IndicatorType, Location, PricePoint, Series,
};
use livechart_core::indicators::{ema, heiken_ashi, macd, rsi, sma, stochastic, williams_r};
use livechart_core::signals::{engulfing_signals, EngulfingParams};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1_000.0_f64, 1..120)
}

fn arb_length() -> impl Strategy<Value = usize> {
    1usize..30
}

/// Random-walk candles: open = previous close, wicks on both sides.
fn arb_candles() -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec((-5.0..5.0_f64, 0.0..3.0_f64, 0.0..3.0_f64), 2..200).prop_map(|steps| {
        let mut prev = 500.0;
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (step, up, down))| {
                let open = prev;
                let close = open + step;
                prev = close;
                PricePoint::candle(
                    i as i64 * 60,
                    open,
                    open.max(close) + up,
                    open.min(close) - down,
                    close,
                )
            })
            .collect()
    })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ── 1-2. Moving averages ─────────────────────────────────────────────

proptest! {
    #[test]
    fn sma_is_window_mean(values in arb_values(), length in arb_length()) {
        let result = sma(&values, length);
        prop_assert_eq!(result.len(), values.len());
        for (i, v) in result.iter().enumerate() {
            if i + 1 < length {
                prop_assert!(v.is_none());
            } else {
                let window = &values[i + 1 - length..=i];
                let mean = window.iter().sum::<f64>() / length as f64;
                prop_assert!(close(v.unwrap(), mean), "i={} got {:?} want {}", i, v, mean);
            }
        }
    }

    #[test]
    fn ema_follows_recurrence(values in arb_values(), length in arb_length()) {
        let result = ema(&values, length);
        let k = 2.0 / (length as f64 + 1.0);
        prop_assert_eq!(result[0], Some(values[0]));
        for i in 1..values.len() {
            let expected = values[i] * k + result[i - 1].unwrap() * (1.0 - k);
            prop_assert!(close(result[i].unwrap(), expected));
        }
    }
}

// ── 3-4. Oscillators ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(values in arb_values(), length in arb_length()) {
        for v in rsi(&values, length).into_iter().flatten() {
            prop_assert!(!v.is_nan());
            prop_assert!((0.0..=100.0).contains(&v), "rsi out of range: {}", v);
        }
    }

    #[test]
    fn macd_histogram_is_difference(values in arb_values()) {
        let lines = macd(&values, 12, 26, 9);
        for i in 0..values.len() {
            if let (Some(m), Some(s), Some(h)) = (lines.macd[i], lines.signal[i], lines.histogram[i]) {
                prop_assert!(close(h, m - s));
            }
        }
    }

    #[test]
    fn bounded_oscillators(candles in arb_candles(), length in arb_length()) {
        let series = Series::from_points(candles);
        let (h, l, c) = (series.highs(), series.lows(), series.closes());
        for v in stochastic(&h, &l, &c, length, 3, 3).k.into_iter().flatten() {
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(&v));
        }
        for v in williams_r(&h, &l, &c, length).into_iter().flatten() {
            prop_assert!((-100.0 - 1e-9..=1e-9).contains(&v));
        }
    }
}

// ── 5. Heiken-Ashi ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn heiken_ashi_open_recurrence(candles in arb_candles()) {
        let series = Series::from_points(candles);
        let (o, h, l, c) = (series.opens(), series.highs(), series.lows(), series.closes());
        let ha = heiken_ashi(&o, &h, &l, &c);
        prop_assert!(close(ha.open[0], (o[0] + c[0]) / 2.0));
        for i in 1..ha.len() {
            prop_assert!(close(ha.open[i], (ha.open[i - 1] + ha.close[i - 1]) / 2.0));
            prop_assert!(ha.high[i] >= ha.open[i].max(ha.close[i]));
            prop_assert!(ha.low[i] <= ha.open[i].min(ha.close[i]));
        }
    }
}

// ── 6. Repeat suppression ────────────────────────────────────────────

proptest! {
    #[test]
    fn engulfing_never_repeats_direction(
        candles in arb_candles(),
        rsi_threshold in 30.0..60.0_f64,
        stability in 0.0..0.6_f64,
    ) {
        let params = EngulfingParams {
            disable_repeating_signals: true,
            rsi_threshold,
            stability_threshold: stability,
            ..EngulfingParams::default()
        };
        let signals = engulfing_signals(&Series::from_points(candles), &params);
        for pair in signals.windows(2) {
            prop_assert_ne!(pair[0].direction, pair[1].direction);
            prop_assert!(pair[0].index < pair[1].index);
        }
    }
}

// ── 7. Catalog alignment ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn catalog_outputs_are_aligned(candles in arb_candles(), length in 1.0..40.0_f64) {
        let series = Series::from_points(candles);
        let times = series.times();
        for kind in ["sma", "ema", "wma", "dema", "wwma", "zlema", "tsf", "hma", "t3", "var",
                     "bbands", "donchian", "envelope", "rsi", "macd", "ao", "adx", "aroon",
                     "cci", "williams_r", "stochastic", "atr", "heiken_ashi"] {
            let d = IndicatorDescriptor::new("p", IndicatorType::from_name(kind), Location::Pane)
                .with_number("length", length.floor());
            match compute_indicator(&series, &d) {
                IndicatorOutput::Line(points) => {
                    let got: Vec<i64> = points.iter().map(|p| p.time).collect();
                    prop_assert_eq!(&got, &times);
                    prop_assert!(points.iter().all(|p| p.value.map_or(true, f64::is_finite)));
                }
                IndicatorOutput::Band(band) => {
                    prop_assert_eq!(band.upper.len(), times.len());
                    prop_assert_eq!(band.lower.len(), times.len());
                }
                IndicatorOutput::Fan(lines) => {
                    for line in lines {
                        prop_assert_eq!(line.points.len(), times.len());
                    }
                }
                IndicatorOutput::Candles(c) => prop_assert_eq!(c.len(), times.len()),
                IndicatorOutput::Signals(_) => prop_assert!(false, "{} produced signals", kind),
            }
        }
    }
}
