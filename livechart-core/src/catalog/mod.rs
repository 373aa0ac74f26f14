//! Indicator catalog and compute dispatch.
//!
//! `compute_indicator` is a pure function of `(series, descriptor)`: the
//! descriptor is resolved into an [`IndicatorSpec`] and an exhaustive match
//! hands the series columns to the math library or a signal engine, then
//! shapes the result (line, band, fan, candles or signals) with the input
//! timestamps copied verbatim.

pub mod spec;

pub use spec::{IndicatorSpec, FALLBACK_SMA_LENGTH};

use crate::domain::{
    fan_line, stamp, Band, IndicatorDescriptor, IndicatorOutput, Line, PricePoint, Series,
};
use crate::indicators::{self as ta, BandLines};
use crate::signals::{engulfing_signals, ha_baseline_signals, Columns};

pub fn compute_indicator(series: &Series, descriptor: &IndicatorDescriptor) -> IndicatorOutput {
    compute_spec(series, &IndicatorSpec::resolve(descriptor))
}

pub fn compute_spec(series: &Series, spec: &IndicatorSpec) -> IndicatorOutput {
    let cols = Columns::of(series);
    let t = &cols.times;
    let (o, h, l, c) = (&cols.opens, &cols.highs, &cols.lows, &cols.closes);
    let line = |values: Line| IndicatorOutput::Line(stamp(t, values));

    match spec {
        IndicatorSpec::Sma { length } => line(ta::sma(c, *length)),
        IndicatorSpec::Ema { length } => line(ta::ema(c, *length)),
        IndicatorSpec::Wma { length } => line(ta::wma(c, *length)),
        IndicatorSpec::Dema { length } => line(ta::dema(c, *length)),
        IndicatorSpec::Wwma { length } => line(ta::wwma(c, *length)),
        IndicatorSpec::Zlema { length } => line(ta::zlema(c, *length)),
        IndicatorSpec::Tsf { length } => line(ta::tsf(c, *length)),
        IndicatorSpec::Hma { length } => line(ta::hma(c, *length)),
        IndicatorSpec::T3 {
            length,
            volume_factor,
        } => line(ta::t3(c, *length, *volume_factor)),
        IndicatorSpec::Var { length } => line(ta::var(c, *length)),
        IndicatorSpec::Bbands { length, multiplier } => {
            band(t, ta::bollinger(c, *length, *multiplier))
        }
        IndicatorSpec::Donchian { length } => band(t, ta::donchian(h, l, *length)),
        IndicatorSpec::Envelope { length, percent } => band(t, ta::envelope(c, *length, *percent)),
        IndicatorSpec::Rsi { length } => line(ta::rsi(c, *length)),
        IndicatorSpec::Macd { fast, slow, signal } => {
            let m = ta::macd(c, *fast, *slow, *signal);
            IndicatorOutput::Fan(vec![
                fan_line("macd", t, m.macd),
                fan_line("signal", t, m.signal),
                fan_line("histogram", t, m.histogram),
            ])
        }
        IndicatorSpec::Ao => line(ta::awesome_oscillator(h, l)),
        IndicatorSpec::Adx { length } => {
            let dmi = ta::adx(h, l, c, *length);
            IndicatorOutput::Fan(vec![
                fan_line("adx", t, dmi.adx),
                fan_line("plus_di", t, dmi.plus_di),
                fan_line("minus_di", t, dmi.minus_di),
            ])
        }
        IndicatorSpec::Aroon { length } => {
            let a = ta::aroon(h, l, *length);
            IndicatorOutput::Fan(vec![fan_line("up", t, a.up), fan_line("down", t, a.down)])
        }
        IndicatorSpec::Cci { length } => line(ta::cci(h, l, c, *length)),
        IndicatorSpec::WilliamsR { length } => line(ta::williams_r(h, l, c, *length)),
        IndicatorSpec::Stochastic {
            k_length,
            k_smooth,
            d_length,
        } => {
            let s = ta::stochastic(h, l, c, *k_length, *k_smooth, *d_length);
            IndicatorOutput::Fan(vec![fan_line("k", t, s.k), fan_line("d", t, s.d)])
        }
        IndicatorSpec::Atr { length } => line(ta::atr(h, l, c, *length)),
        IndicatorSpec::HeikenAshi => {
            let ha = ta::heiken_ashi(o, h, l, c);
            IndicatorOutput::Candles(
                (0..ha.len())
                    .map(|i| PricePoint::candle(t[i], ha.open[i], ha.high[i], ha.low[i], ha.close[i]))
                    .collect(),
            )
        }
        IndicatorSpec::HaBaseline(params) => {
            IndicatorOutput::Signals(ha_baseline_signals(series, params))
        }
        IndicatorSpec::Engulfing(params) => {
            IndicatorOutput::Signals(engulfing_signals(series, params))
        }
    }
}

fn band(times: &[i64], lines: BandLines) -> IndicatorOutput {
    IndicatorOutput::Band(Band {
        upper: stamp(times, lines.upper),
        middle: stamp(times, lines.middle),
        lower: stamp(times, lines.lower),
    })
}
