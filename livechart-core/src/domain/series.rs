//! Series: an ascending, duplicate-free sequence of price points.
//!
//! The computation layer treats a `Series` as a read-only snapshot; the chart
//! driver owns it and mutates it through [`Series::push`] as live ticks arrive.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ids::ContentHash;
use super::point::PricePoint;

/// Rejected mutations of a working series.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    #[error("point at {incoming} is older than the series tail at {last}")]
    OutOfOrder { last: i64, incoming: i64 },
    #[error("point at {time} has no finite close or value")]
    Malformed { time: i64 },
}

/// What [`Series::push`] did with an accepted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Appended,
    ReplacedTail,
}

/// Deserializing goes through [`Series::from_points`], so a decoded series
/// upholds the same ordering and sanity rules as one built in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct Series {
    points: Vec<PricePoint>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from raw points.
    ///
    /// Malformed points are dropped, a duplicate timestamp overwrites the
    /// previous point, and points older than the running tail are dropped.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut series = Self::new();
        let mut dropped = 0usize;
        for point in points {
            if series.push(point).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!(dropped, kept = series.len(), "dropped unusable points");
        }
        series
    }

    /// Append a point, or overwrite the tail if it shares the tail's timestamp.
    pub fn push(&mut self, point: PricePoint) -> Result<PushOutcome, SeriesError> {
        if point.is_malformed() {
            return Err(SeriesError::Malformed { time: point.time });
        }
        match self.points.last_mut() {
            Some(last) if point.time < last.time => Err(SeriesError::OutOfOrder {
                last: last.time,
                incoming: point.time,
            }),
            Some(last) if point.time == last.time => {
                trace!(time = point.time, "overwriting series tail");
                *last = point;
                Ok(PushOutcome::ReplacedTail)
            }
            _ => {
                self.points.push(point);
                Ok(PushOutcome::Appended)
            }
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_time(&self) -> Option<i64> {
        self.points.first().map(|p| p.time)
    }

    pub fn last_time(&self) -> Option<i64> {
        self.points.last().map(|p| p.time)
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn times(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.time).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ohlc().3).collect()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ohlc().0).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ohlc().1).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.ohlc().2).collect()
    }

    /// Deterministic BLAKE3 digest of every point's fields.
    pub fn content_hash(&self) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.points.len() as u64).to_le_bytes());
        for p in &self.points {
            hasher.update(&p.time.to_le_bytes());
            for field in [p.open, p.high, p.low, p.close, p.value] {
                match field {
                    Some(v) => {
                        hasher.update(&[1]);
                        hasher.update(&v.to_bits().to_le_bytes());
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
        }
        ContentHash::from_digest(hasher.finalize())
    }
}

impl From<Vec<PricePoint>> for Series {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<Series> for Vec<PricePoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}
