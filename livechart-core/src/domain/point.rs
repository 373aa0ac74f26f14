//! PricePoint: the fundamental market data unit.

use serde::{Deserialize, Serialize};

/// One sample of a price series: either a full OHLC candle or a line tick.
///
/// `time` is an integer epoch (seconds or milliseconds, the library does not
/// care which as long as a series is consistent). At least one of `close` /
/// `value` carries the price; see [`PricePoint::price`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl PricePoint {
    /// A line-only point (tick).
    pub fn tick(time: i64, value: f64) -> Self {
        Self {
            time,
            open: None,
            high: None,
            low: None,
            close: None,
            value: Some(value),
        }
    }

    /// A full OHLC candle.
    pub fn candle(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            value: None,
        }
    }

    /// The point's price: `close`, falling back to `value`. Non-finite
    /// numbers count as absent.
    pub fn price(&self) -> Option<f64> {
        self.close
            .filter(|v| v.is_finite())
            .or(self.value.filter(|v| v.is_finite()))
    }

    /// Returns true if the point carries no usable price (void point).
    pub fn is_malformed(&self) -> bool {
        self.price().is_none()
    }

    /// Returns true if all four OHLC fields are present and finite.
    pub fn has_ohlc(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|f| f.is_some_and(|v| v.is_finite()))
    }

    /// OHLC sanity: `low <= min(open, close) <= max(open, close) <= high`.
    /// Line points are trivially sane.
    pub fn is_sane(&self) -> bool {
        if !self.has_ohlc() {
            return !self.is_malformed();
        }
        let (o, h, l, c) = self.ohlc();
        l <= o.min(c) && o.max(c) <= h
    }

    /// OHLC tuple. Missing fields fall back to the point's price so that a line
    /// point projects into a flat candle. Callers must filter malformed points
    /// first; a malformed point projects to NaN.
    pub fn ohlc(&self) -> (f64, f64, f64, f64) {
        let p = self.price().unwrap_or(f64::NAN);
        let pick = |f: Option<f64>| f.filter(|v| v.is_finite()).unwrap_or(p);
        (pick(self.open), pick(self.high), pick(self.low), p)
    }

    /// The same point reduced to `{time, value}` (area charts).
    pub fn to_line(&self) -> Self {
        match self.price() {
            Some(p) => Self::tick(self.time, p),
            None => *self,
        }
    }
}
