//! Input files: candle/tick CSV and indicator TOML.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, warn};

use livechart_core::domain::{IndicatorDescriptor, PricePoint};

#[derive(Debug, Deserialize)]
struct Row {
    time: String,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    value: Option<f64>,
}

/// `[[indicator]]` tables.
#[derive(Debug, Deserialize)]
struct IndicatorFile {
    #[serde(default, rename = "indicator")]
    indicators: Vec<IndicatorDescriptor>,
}

/// Integer epoch, RFC 3339, or `YYYY-MM-DD` (midnight UTC), as epoch seconds.
pub fn parse_time(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    if let Ok(epoch) = raw.parse::<i64>() {
        return Ok(epoch);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp());
        }
    }
    bail!("unrecognised time '{raw}'")
}

/// Read every row of a candle/tick CSV as a raw point, in file order.
/// Rows without any price are kept here; the series drops them later.
pub fn read_points(path: &Path) -> Result<Vec<PricePoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut points = Vec::new();
    for (line, row) in reader.deserialize::<Row>().enumerate() {
        let row = row.with_context(|| format!("{}: row {}", path.display(), line + 1))?;
        let time = parse_time(&row.time)
            .with_context(|| format!("{}: row {}", path.display(), line + 1))?;
        let point = PricePoint {
            time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            value: row.value,
        };
        if !point.is_sane() {
            warn!(time, "row fails OHLC sanity check");
        }
        points.push(point);
    }
    debug!(rows = points.len(), path = %path.display(), "candles loaded");
    Ok(points)
}

pub fn parse_indicators(content: &str) -> Result<Vec<IndicatorDescriptor>> {
    let file: IndicatorFile = toml::from_str(content).context("parse indicator list")?;
    Ok(file.indicators)
}

pub fn read_indicators(path: &Path) -> Result<Vec<IndicatorDescriptor>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_indicators(&content).with_context(|| format!("in {}", path.display()))
}
