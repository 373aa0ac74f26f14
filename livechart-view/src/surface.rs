//! The external charting surface.
//!
//! The session never draws anything itself: it issues data, viewport, series
//! and marker calls against a [`ChartSurface`] and asks it for coordinate
//! mappings. [`RecordingSurface`] is an in-memory implementation that logs
//! every call; the CLI and the tests drive sessions against it.

use serde::Serialize;

use livechart_core::domain::{IndicatorId, IndicatorOutput, Location, PricePoint};

use crate::layout::PaneLayout;
use crate::overlay::MarkerDiff;
use crate::view_state::TimeRange;

/// Time → x and price → y in surface pixels. `None` when the surface cannot
/// place the value (outside the visible range, or no data yet).
pub trait CoordinateMapper {
    fn time_to_x(&self, time: i64) -> Option<f64>;
    fn price_to_y(&self, price: f64) -> Option<f64>;
}

pub trait ChartSurface: CoordinateMapper {
    /// Replace the main series.
    fn set_data(&mut self, points: &[PricePoint]);
    /// Append a point, or overwrite the last one when the time matches.
    fn update(&mut self, point: PricePoint);

    fn set_visible_range(&mut self, range: TimeRange);
    fn scroll_to_live_edge(&mut self);
    fn visible_range(&self) -> Option<TimeRange>;

    /// Create or replace the visual for one indicator.
    fn set_indicator(&mut self, id: &IndicatorId, location: Location, output: &IndicatorOutput);
    fn remove_indicator(&mut self, id: &IndicatorId);

    fn apply_markers(&mut self, diff: &MarkerDiff);
    fn set_pane_layout(&mut self, layout: &PaneLayout);
}

// ── Recording surface ───────────────────────────────────────────────

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum SurfaceCall {
    SetData {
        len: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        last: Option<i64>,
    },
    Update {
        point: PricePoint,
    },
    SetVisibleRange {
        range: TimeRange,
    },
    ScrollToLiveEdge,
    SetIndicator {
        id: IndicatorId,
        location: Location,
        output: IndicatorOutput,
    },
    RemoveIndicator {
        id: IndicatorId,
    },
    ApplyMarkers {
        diff: MarkerDiff,
    },
    SetPaneLayout {
        layout: PaneLayout,
    },
}

/// In-memory surface with linear coordinate mapping over the visible range
/// and the data's price extremes.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    data: Vec<PricePoint>,
    visible: Option<TimeRange>,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            data: Vec::new(),
            visible: None,
            calls: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn data(&self) -> &[PricePoint] {
        &self.data
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Hand over the calls recorded so far.
    pub fn drain_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    fn data_range(&self) -> Option<TimeRange> {
        Some(TimeRange::new(self.data.first()?.time, self.data.last()?.time))
    }

    fn price_extent(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter_map(|p| {
                if p.has_ohlc() {
                    let (_, h, l, _) = p.ohlc();
                    Some((l, h))
                } else {
                    p.price().map(|v| (v, v))
                }
            })
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

impl CoordinateMapper for RecordingSurface {
    fn time_to_x(&self, time: i64) -> Option<f64> {
        let range = self.visible.or_else(|| self.data_range())?;
        if time < range.from || time > range.to {
            return None;
        }
        let width = range.width().max(1) as f64;
        Some((time - range.from) as f64 / width * self.width)
    }

    fn price_to_y(&self, price: f64) -> Option<f64> {
        if !price.is_finite() {
            return None;
        }
        let (lo, hi) = self.price_extent()?;
        if hi <= lo {
            return Some(self.height / 2.0);
        }
        Some((hi - price) / (hi - lo) * self.height)
    }
}

impl ChartSurface for RecordingSurface {
    fn set_data(&mut self, points: &[PricePoint]) {
        self.data = points.to_vec();
        self.calls.push(SurfaceCall::SetData {
            len: points.len(),
            last: points.last().map(|p| p.time),
        });
    }

    fn update(&mut self, point: PricePoint) {
        match self.data.last_mut() {
            Some(last) if last.time == point.time => *last = point,
            _ => self.data.push(point),
        }
        self.calls.push(SurfaceCall::Update { point });
    }

    fn set_visible_range(&mut self, range: TimeRange) {
        self.visible = Some(range);
        self.calls.push(SurfaceCall::SetVisibleRange { range });
    }

    fn scroll_to_live_edge(&mut self) {
        if let Some(data) = self.data_range() {
            let width = self.visible.map_or(data.width(), |v| v.width());
            self.visible = Some(TimeRange::new(data.to - width, data.to));
        }
        self.calls.push(SurfaceCall::ScrollToLiveEdge);
    }

    fn visible_range(&self) -> Option<TimeRange> {
        self.visible
    }

    fn set_indicator(&mut self, id: &IndicatorId, location: Location, output: &IndicatorOutput) {
        self.calls.push(SurfaceCall::SetIndicator {
            id: id.clone(),
            location,
            output: output.clone(),
        });
    }

    fn remove_indicator(&mut self, id: &IndicatorId) {
        self.calls.push(SurfaceCall::RemoveIndicator { id: id.clone() });
    }

    fn apply_markers(&mut self, diff: &MarkerDiff) {
        self.calls.push(SurfaceCall::ApplyMarkers { diff: diff.clone() });
    }

    fn set_pane_layout(&mut self, layout: &PaneLayout) {
        self.calls.push(SurfaceCall::SetPaneLayout {
            layout: layout.clone(),
        });
    }
}
