//! Typed indicator specs resolved from loose descriptors.
//!
//! Resolution never fails. A missing, wrong-typed or out-of-range parameter
//! takes its default, and an unknown indicator type becomes SMA-14.

use tracing::debug;

use crate::domain::{IndicatorDescriptor, IndicatorType};
use crate::indicators::DEFAULT_VOLUME_FACTOR;
use crate::signals::{EngulfingParams, HaBaselineParams, RewardRatio};

/// Length used by the unknown-type fallback.
pub const FALLBACK_SMA_LENGTH: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSpec {
    Sma { length: usize },
    Ema { length: usize },
    Wma { length: usize },
    Dema { length: usize },
    Wwma { length: usize },
    Zlema { length: usize },
    Tsf { length: usize },
    Hma { length: usize },
    T3 { length: usize, volume_factor: f64 },
    Var { length: usize },
    Bbands { length: usize, multiplier: f64 },
    Donchian { length: usize },
    Envelope { length: usize, percent: f64 },
    Rsi { length: usize },
    Macd { fast: usize, slow: usize, signal: usize },
    Ao,
    Adx { length: usize },
    Aroon { length: usize },
    Cci { length: usize },
    WilliamsR { length: usize },
    Stochastic { k_length: usize, k_smooth: usize, d_length: usize },
    Atr { length: usize },
    HeikenAshi,
    HaBaseline(HaBaselineParams),
    Engulfing(EngulfingParams),
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Extract a named f64 parameter, falling back to `default`.
fn param(d: &IndicatorDescriptor, name: &str, default: f64) -> f64 {
    d.number(name).unwrap_or(default)
}

/// Extract a named window length (>= 1), falling back to `default`.
fn param_len(d: &IndicatorDescriptor, name: &str, default: usize) -> usize {
    d.number(name)
        .filter(|v| *v >= 1.0)
        .map(|v| v as usize)
        .unwrap_or(default)
}

fn param_flag(d: &IndicatorDescriptor, name: &str, default: bool) -> bool {
    d.flag(name).unwrap_or(default)
}

// ── Resolution ──────────────────────────────────────────────────────

impl IndicatorSpec {
    pub fn resolve(d: &IndicatorDescriptor) -> Self {
        let length = |default| param_len(d, "length", default);
        match &d.kind {
            IndicatorType::Sma => Self::Sma { length: length(14) },
            IndicatorType::Ema => Self::Ema { length: length(14) },
            IndicatorType::Wma => Self::Wma { length: length(14) },
            IndicatorType::Dema => Self::Dema { length: length(14) },
            IndicatorType::Wwma => Self::Wwma { length: length(14) },
            IndicatorType::Zlema => Self::Zlema { length: length(14) },
            IndicatorType::Tsf => Self::Tsf { length: length(14) },
            IndicatorType::Hma => Self::Hma { length: length(14) },
            IndicatorType::T3 => Self::T3 {
                length: length(5),
                volume_factor: d
                    .number("volume_factor")
                    .or_else(|| d.number("vol"))
                    .unwrap_or(DEFAULT_VOLUME_FACTOR),
            },
            IndicatorType::Var => Self::Var { length: length(14) },
            IndicatorType::Bbands => Self::Bbands {
                length: length(20),
                multiplier: param(d, "multiplier", 2.0),
            },
            IndicatorType::Donchian => Self::Donchian { length: length(20) },
            IndicatorType::Envelope => Self::Envelope {
                length: length(20),
                percent: param(d, "percent", 2.5),
            },
            IndicatorType::Rsi => Self::Rsi { length: length(14) },
            IndicatorType::Macd => Self::Macd {
                fast: param_len(d, "fast", 12),
                slow: param_len(d, "slow", 26),
                signal: param_len(d, "signal", 9),
            },
            IndicatorType::Ao => Self::Ao,
            IndicatorType::Adx => Self::Adx { length: length(14) },
            IndicatorType::Aroon => Self::Aroon { length: length(14) },
            IndicatorType::Cci => Self::Cci { length: length(20) },
            IndicatorType::WilliamsR => Self::WilliamsR { length: length(14) },
            IndicatorType::Stochastic => Self::Stochastic {
                k_length: param_len(d, "k_length", 14),
                k_smooth: param_len(d, "k_smooth", 3),
                d_length: param_len(d, "d_length", 3),
            },
            IndicatorType::Atr => Self::Atr { length: length(14) },
            IndicatorType::HeikenAshi => Self::HeikenAshi,
            IndicatorType::HaBaseline => Self::HaBaseline(ha_baseline_params(d)),
            IndicatorType::Engulfing => Self::Engulfing(engulfing_params(d)),
            IndicatorType::Unknown(name) => {
                debug!(id = %d.id, kind = %name, "unknown indicator type, using sma-14");
                Self::Sma {
                    length: FALLBACK_SMA_LENGTH,
                }
            }
        }
    }

    /// True for the pattern engines (signal list output).
    pub fn emits_signals(&self) -> bool {
        matches!(self, Self::HaBaseline(_) | Self::Engulfing(_))
    }
}

fn ha_baseline_params(d: &IndicatorDescriptor) -> HaBaselineParams {
    let base = HaBaselineParams::default();
    HaBaselineParams {
        ema_length: param_len(d, "ema_length", base.ema_length),
        baseline_length: param_len(d, "baseline_length", base.baseline_length),
        slope_lookback: param_len(d, "slope_lookback", base.slope_lookback),
        min_wick_ratio: param(d, "min_wick_ratio", base.min_wick_ratio),
        use_trend_filter: param_flag(d, "use_trend_filter", base.use_trend_filter),
        atr_length: param_len(d, "atr_length", base.atr_length),
        tp_multiplier: param(d, "tp_multiplier", base.tp_multiplier),
        sl_multiplier: param(d, "sl_multiplier", base.sl_multiplier),
    }
}

fn engulfing_params(d: &IndicatorDescriptor) -> EngulfingParams {
    let base = EngulfingParams::default();
    EngulfingParams {
        atr_length: param_len(d, "atr_length", base.atr_length),
        rsi_length: param_len(d, "rsi_length", base.rsi_length),
        stability_threshold: param(d, "stability_threshold", base.stability_threshold),
        rsi_threshold: param(d, "rsi_threshold", base.rsi_threshold),
        delta_len: param_len(d, "delta_len", base.delta_len),
        disable_repeating_signals: param_flag(
            d,
            "disable_repeating_signals",
            base.disable_repeating_signals,
        ),
        risk_multiplier: param(d, "risk_multiplier", base.risk_multiplier),
        reward_ratio: d
            .text("reward_ratio")
            .map(RewardRatio::from_label)
            .unwrap_or(base.reward_ratio),
        precision: d
            .number("precision")
            .filter(|v| (0.0..=12.0).contains(v))
            .map(|v| v as u32)
            .unwrap_or(base.precision),
    }
}
