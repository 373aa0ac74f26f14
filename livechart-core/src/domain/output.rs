//! Derived output shapes handed to the rendering surface.

use serde::{Deserialize, Serialize};

use super::point::PricePoint;
use super::signal::Signal;

/// Raw aligned output of the series math library: one slot per input sample,
/// `None` meaning "insufficient history" (never zero).
pub type Line = Vec<Option<f64>>;

/// One timestamped sample of a derived line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: i64,
    pub value: Option<f64>,
}

/// Upper / middle / lower triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub upper: Vec<LinePoint>,
    pub middle: Vec<LinePoint>,
    pub lower: Vec<LinePoint>,
}

/// One named member of a multi-line fan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanLine {
    pub name: String,
    pub points: Vec<LinePoint>,
}

/// Everything one indicator can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data", rename_all = "lowercase")]
pub enum IndicatorOutput {
    Line(Vec<LinePoint>),
    Band(Band),
    Fan(Vec<FanLine>),
    Candles(Vec<PricePoint>),
    Signals(Vec<Signal>),
}

impl IndicatorOutput {
    pub fn signals(&self) -> Option<&[Signal]> {
        match self {
            Self::Signals(s) => Some(s),
            _ => None,
        }
    }

    /// Number of samples per line (0 for signal lists).
    pub fn len(&self) -> usize {
        match self {
            Self::Line(points) => points.len(),
            Self::Band(band) => band.middle.len(),
            Self::Fan(lines) => lines.first().map_or(0, |l| l.points.len()),
            Self::Candles(c) => c.len(),
            Self::Signals(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Attach the input timestamps to a computed line. The time field is copied
/// verbatim; `times` and `values` must be the same length.
pub fn stamp(times: &[i64], values: Line) -> Vec<LinePoint> {
    debug_assert_eq!(times.len(), values.len(), "indicator output misaligned");
    times
        .iter()
        .zip(values)
        .map(|(&time, value)| LinePoint { time, value })
        .collect()
}

/// Build a named fan line.
pub fn fan_line(name: &str, times: &[i64], values: Line) -> FanLine {
    FanLine {
        name: name.to_string(),
        points: stamp(times, values),
    }
}
