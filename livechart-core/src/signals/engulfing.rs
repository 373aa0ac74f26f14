//! Engulfing candle-pattern engine.
//!
//! Support series: ATR(`atr_length`), RSI(`rsi_length`) and the true range.
//! A bar is *stable* when |close - open| / TR > `stability_threshold`
//! (a zero TR is never stable).
//!
//! Bullish trigger: stable, prior bar bearish, current bar bullish and closing
//! above the prior open, RSI < `rsi_threshold`, close below the close
//! `delta_len` bars ago. Bearish mirrors with RSI > 100 - `rsi_threshold` and
//! close above the lagged close.
//!
//! With `disable_repeating_signals`, a trigger in the same direction as the
//! last emitted signal is swallowed. The last direction is the accumulator of
//! the bar fold.
//!
//! Exit levels: risk = ATR * `risk_multiplier`, reward = risk x the reward
//! ratio. Both levels are rounded *up* to `precision` decimals for longs and
//! shorts alike.

use tracing::debug;

use super::{ceil_to, Columns};
use crate::domain::{Series, Signal, SignalDirection};
use crate::indicators::{atr, rsi, true_range};

/// Reward : risk setting. Anything unrecognised is 1:1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RewardRatio {
    #[default]
    OneToOne,
    OneToTwo,
    OneToFour,
    TwoToThree,
}

impl RewardRatio {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "1:2" => Self::OneToTwo,
            "1:4" => Self::OneToFour,
            "2:3" => Self::TwoToThree,
            _ => Self::OneToOne,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneToOne => "1:1",
            Self::OneToTwo => "1:2",
            Self::OneToFour => "1:4",
            Self::TwoToThree => "2:3",
        }
    }

    /// Reward distance as a multiple of the risk distance.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::OneToOne => 1.0,
            Self::OneToTwo => 2.0,
            Self::OneToFour => 4.0,
            Self::TwoToThree => 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngulfingParams {
    pub atr_length: usize,
    pub rsi_length: usize,
    pub stability_threshold: f64,
    pub rsi_threshold: f64,
    pub delta_len: usize,
    pub disable_repeating_signals: bool,
    pub risk_multiplier: f64,
    pub reward_ratio: RewardRatio,
    pub precision: u32,
}

impl Default for EngulfingParams {
    fn default() -> Self {
        Self {
            atr_length: 14,
            rsi_length: 14,
            stability_threshold: 0.5,
            rsi_threshold: 30.0,
            delta_len: 4,
            disable_repeating_signals: true,
            risk_multiplier: 1.0,
            reward_ratio: RewardRatio::OneToTwo,
            precision: 2,
        }
    }
}

pub fn engulfing_signals(series: &Series, params: &EngulfingParams) -> Vec<Signal> {
    let cols = Columns::of(series);
    let n = cols.len();
    if n < 2 {
        return Vec::new();
    }

    let (o, h, l, c) = (&cols.opens, &cols.highs, &cols.lows, &cols.closes);
    let tr = true_range(h, l, c);
    let atr = atr(h, l, c, params.atr_length);
    let rsi = rsi(c, params.rsi_length);

    let trigger = |i: usize| -> Option<SignalDirection> {
        let stable = tr[i] > 0.0 && (c[i] - o[i]).abs() / tr[i] > params.stability_threshold;
        if !stable {
            return None;
        }
        let r = rsi[i]?;
        let lagged = c[i.checked_sub(params.delta_len)?];

        let bullish = c[i - 1] < o[i - 1]
            && c[i] > o[i]
            && c[i] > o[i - 1]
            && r < params.rsi_threshold
            && c[i] < lagged;
        let bearish = c[i - 1] > o[i - 1]
            && c[i] < o[i]
            && c[i] < o[i - 1]
            && r > 100.0 - params.rsi_threshold
            && c[i] > lagged;

        match (bullish, bearish) {
            (true, false) => Some(SignalDirection::Long),
            (false, true) => Some(SignalDirection::Short),
            _ => None,
        }
    };

    let (_, signals) = (1..n).fold(
        (None::<SignalDirection>, Vec::new()),
        |(last, mut out), i| {
            let Some(direction) = trigger(i) else {
                return (last, out);
            };
            if params.disable_repeating_signals && last == Some(direction) {
                return (last, out);
            }
            let (tp, sl) = exit_levels(c[i], atr[i], direction, params);
            out.push(Signal {
                index: i,
                time: cols.times[i],
                direction,
                price: c[i],
                tp,
                sl,
            });
            (Some(direction), out)
        },
    );

    debug!(bars = n, signals = signals.len(), "engulfing pass");
    signals
}

fn exit_levels(
    close: f64,
    atr: Option<f64>,
    direction: SignalDirection,
    params: &EngulfingParams,
) -> (Option<f64>, Option<f64>) {
    let Some(atr) = atr else {
        return (None, None);
    };
    let risk = atr * params.risk_multiplier;
    let reward = risk * params.reward_ratio.multiplier();
    let (tp, sl) = match direction {
        SignalDirection::Long => (close + reward, close - risk),
        SignalDirection::Short => (close - reward, close + risk),
    };
    (
        Some(ceil_to(tp, params.precision)),
        Some(ceil_to(sl, params.precision)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_ratio_labels() {
        assert_eq!(RewardRatio::from_label("1:2").multiplier(), 2.0);
        assert_eq!(RewardRatio::from_label("1:4").multiplier(), 4.0);
        assert_eq!(RewardRatio::from_label("2:3").multiplier(), 1.5);
        assert_eq!(RewardRatio::from_label("3:7"), RewardRatio::OneToOne);
        assert_eq!(RewardRatio::TwoToThree.label(), "2:3");
    }

    #[test]
    fn exit_levels_ceil_for_both_directions() {
        let params = EngulfingParams {
            risk_multiplier: 1.0,
            reward_ratio: RewardRatio::OneToOne,
            precision: 1,
            ..EngulfingParams::default()
        };
        // long: tp 10.33 → 10.4, sl 9.87 → 9.9
        let (tp, sl) = exit_levels(10.1, Some(0.23), SignalDirection::Long, &params);
        assert_eq!(tp, Some(10.4));
        assert_eq!(sl, Some(9.9));
        // short: tp 9.87 → 9.9, sl 10.33 → 10.4
        let (tp, sl) = exit_levels(10.1, Some(0.23), SignalDirection::Short, &params);
        assert_eq!(tp, Some(9.9));
        assert_eq!(sl, Some(10.4));
    }

    #[test]
    fn no_atr_means_no_levels() {
        let params = EngulfingParams::default();
        assert_eq!(exit_levels(1.0, None, SignalDirection::Long, &params), (None, None));
    }

    #[test]
    fn too_short_is_silent() {
        let series = Series::from_points(vec![crate::domain::PricePoint::candle(0, 1.0, 2.0, 0.5, 1.5)]);
        assert!(engulfing_signals(&series, &EngulfingParams::default()).is_empty());
    }
}
