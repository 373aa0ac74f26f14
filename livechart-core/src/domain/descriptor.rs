//! Indicator descriptors: what the UI layer asks the core to compute.
//!
//! A descriptor is deliberately loose (a type name plus a bag of parameters)
//! so that configuration written by newer front-ends still loads. The catalog
//! resolves it into a strongly typed [`IndicatorSpec`](crate::catalog::IndicatorSpec).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ids::{ContentHash, IndicatorId};

/// Discriminant of an indicator descriptor.
///
/// Unrecognised names deserialize to `Unknown` (keeping the original name)
/// instead of failing, so forward-compatible configuration still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndicatorType {
    Sma,
    Ema,
    Wma,
    Dema,
    Wwma,
    Zlema,
    Tsf,
    Hma,
    T3,
    Var,
    Bbands,
    Donchian,
    Envelope,
    Rsi,
    Macd,
    Ao,
    Adx,
    Aroon,
    Cci,
    WilliamsR,
    Stochastic,
    Atr,
    HeikenAshi,
    HaBaseline,
    Engulfing,
    Unknown(String),
}

impl IndicatorType {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sma" => Self::Sma,
            "ema" => Self::Ema,
            "wma" => Self::Wma,
            "dema" => Self::Dema,
            "wwma" | "rma" => Self::Wwma,
            "zlema" => Self::Zlema,
            "tsf" => Self::Tsf,
            "hma" | "hull" => Self::Hma,
            "t3" | "tillson" => Self::T3,
            "var" | "vidya" => Self::Var,
            "bbands" | "bollinger" => Self::Bbands,
            "donchian" => Self::Donchian,
            "envelope" => Self::Envelope,
            "rsi" => Self::Rsi,
            "macd" => Self::Macd,
            "ao" => Self::Ao,
            "adx" | "dmi" => Self::Adx,
            "aroon" => Self::Aroon,
            "cci" => Self::Cci,
            "williams_r" | "willr" => Self::WilliamsR,
            "stochastic" | "stoch" => Self::Stochastic,
            "atr" => Self::Atr,
            "heiken_ashi" | "heikin_ashi" => Self::HeikenAshi,
            "ha_baseline" => Self::HaBaseline,
            "engulfing" => Self::Engulfing,
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Wma => "wma",
            Self::Dema => "dema",
            Self::Wwma => "wwma",
            Self::Zlema => "zlema",
            Self::Tsf => "tsf",
            Self::Hma => "hma",
            Self::T3 => "t3",
            Self::Var => "var",
            Self::Bbands => "bbands",
            Self::Donchian => "donchian",
            Self::Envelope => "envelope",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::Ao => "ao",
            Self::Adx => "adx",
            Self::Aroon => "aroon",
            Self::Cci => "cci",
            Self::WilliamsR => "williams_r",
            Self::Stochastic => "stochastic",
            Self::Atr => "atr",
            Self::HeikenAshi => "heiken_ashi",
            Self::HaBaseline => "ha_baseline",
            Self::Engulfing => "engulfing",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for IndicatorType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<IndicatorType> for String {
    fn from(kind: IndicatorType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an indicator is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// On top of the main price pane.
    #[default]
    Overlay,
    /// In its own pane below the price pane.
    Pane,
}

/// A loosely typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDescriptor {
    pub id: IndicatorId,
    #[serde(rename = "type")]
    pub kind: IndicatorType,
    #[serde(default)]
    pub location: Location,
    /// `BTreeMap` keeps serialization, and therefore hashing, deterministic.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
}

impl IndicatorDescriptor {
    pub fn new(id: impl Into<String>, kind: IndicatorType, location: Location) -> Self {
        Self {
            id: IndicatorId::new(id),
            kind,
            location,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn with_number(self, name: impl Into<String>, value: f64) -> Self {
        self.with_param(name, ParamValue::Number(value))
    }

    pub fn with_flag(self, name: impl Into<String>, value: bool) -> Self {
        self.with_param(name, ParamValue::Flag(value))
    }

    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_param(name, ParamValue::Text(value.into()))
    }

    /// Numeric parameter. Numeric strings are accepted.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.parameters.get(name)? {
            ParamValue::Number(v) if v.is_finite() => Some(*v),
            ParamValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Boolean parameter. Accepts `true`/`false` strings and 0 / non-zero numbers.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.parameters.get(name)? {
            ParamValue::Flag(b) => Some(*b),
            ParamValue::Number(v) => Some(*v != 0.0),
            ParamValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.parameters.get(name)? {
            ParamValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Hash of the canonical JSON form of this descriptor.
    pub fn content_hash(&self) -> ContentHash {
        match serde_json::to_vec(self) {
            Ok(bytes) => ContentHash::from_bytes(&bytes),
            // Only non-string map keys can fail here, and the map keys are strings.
            Err(_) => ContentHash::from_bytes(format!("{self:?}").as_bytes()),
        }
    }
}
