//! Incremental update engine.
//!
//! Two inputs drive it:
//! - data snapshots, classified as a major reset or a minor append / tail
//!   update ([`UpdateEngine::apply_snapshot`])
//! - view events from the host: visible-range changes, zoom steps and
//!   explicit resets ([`UpdateEngine::handle`])
//!
//! Each input yields plain instructions (what to do with the data, what to do
//! with the viewport); the session carries them out against the surface.

use serde::Serialize;
use tracing::{debug, trace};

use livechart_core::domain::{PricePoint, Series};

use crate::config::ViewConfig;
use crate::view_state::{TimeRange, ViewMode, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorReason {
    /// First non-empty snapshot since the chart was created.
    First,
    /// The first timestamp moved (history window shifted or replaced).
    OriginShifted { delta: i64 },
    /// Same origin but fewer points than before.
    Truncated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotKind {
    Major { reason: MajorReason },
    Minor,
}

/// What to do with the surface's data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "data", content = "points", rename_all = "snake_case")]
pub enum DataAction {
    /// Replace everything.
    Reset(Vec<PricePoint>),
    /// Append these points one by one.
    Append(Vec<PricePoint>),
    /// Overwrite the still-forming last point.
    ReplaceLast(PricePoint),
    None,
}

/// What to do with the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewAction {
    Keep,
    ScrollToLiveEdge,
    /// Scroll to the live edge once the debounce delay passes.
    ScheduleScroll,
    SetVisibleRange { range: TimeRange },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePlan {
    pub kind: SnapshotKind,
    pub data: DataAction,
    pub view: ViewAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

/// Host-originated view events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    /// The surface reports a new visible range (pan, scroll, or a zoom
    /// gesture the surface handled itself, with its zoom factor if known).
    RangeChanged {
        range: TimeRange,
        zoom_factor: Option<f64>,
    },
    Zoom(ZoomDirection),
    ResetView,
}

/// First and latest timestamps of the current data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBounds {
    pub start: i64,
    pub latest: i64,
}

impl DataBounds {
    pub fn of(series: &Series) -> Option<Self> {
        Some(Self {
            start: series.first_time()?,
            latest: series.last_time()?,
        })
    }

    pub fn span(&self) -> i64 {
        self.latest - self.start
    }

    pub fn full_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.latest)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEngine {
    state: ViewState,
    config: ViewConfig,
    /// Last point of the previous snapshot, as the surface last saw it.
    last_tail: Option<PricePoint>,
}

impl UpdateEngine {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            state: ViewState::new(),
            config,
            last_tail: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    // ── Snapshots ───────────────────────────────────────────────────

    pub fn classify(&self, series: &Series) -> SnapshotKind {
        let start = series.first_time();
        match (self.state.last_series_start_time, start) {
            (None, _) => SnapshotKind::Major {
                reason: MajorReason::First,
            },
            (Some(prev), Some(now)) if prev != now => SnapshotKind::Major {
                reason: MajorReason::OriginShifted { delta: now - prev },
            },
            (Some(_), None) => SnapshotKind::Major {
                reason: MajorReason::Truncated,
            },
            _ if series.len() < self.state.last_series_length => SnapshotKind::Major {
                reason: MajorReason::Truncated,
            },
            _ => SnapshotKind::Minor,
        }
    }

    pub fn apply_snapshot(&mut self, series: &Series) -> UpdatePlan {
        let before = self.state.mode();
        let kind = self.classify(series);

        let (data, view) = match kind {
            SnapshotKind::Major { reason } => self.major(series, reason),
            SnapshotKind::Minor => self.minor(series),
        };

        self.state.last_series_start_time = series.first_time();
        self.state.last_series_length = series.len();
        self.last_tail = series.last().copied();

        debug!(?kind, points = series.len(), ?view, "snapshot classified");
        self.log_transition(before);
        UpdatePlan { kind, data, view }
    }

    fn major(&mut self, series: &Series, reason: MajorReason) -> (DataAction, ViewAction) {
        let data = DataAction::Reset(series.points().to_vec());
        let Some(bounds) = DataBounds::of(series) else {
            return (data, ViewAction::Keep);
        };

        if self.state.is_locked() {
            let delta = match reason {
                MajorReason::OriginShifted { delta } => delta,
                _ => 0,
            };
            let view = match self.state.last_visible_range {
                Some(range) => {
                    let shifted = range.shift(delta).clamp(bounds.start, bounds.latest);
                    if shifted.is_valid() {
                        self.state.last_visible_range = Some(shifted);
                        ViewAction::SetVisibleRange { range: shifted }
                    } else {
                        ViewAction::ScrollToLiveEdge
                    }
                }
                None => ViewAction::Keep,
            };
            return (data, view);
        }

        if !self.state.user_interacted && self.state.auto_scroll {
            (data, ViewAction::ScheduleScroll)
        } else {
            (data, ViewAction::Keep)
        }
    }

    fn minor(&mut self, series: &Series) -> (DataAction, ViewAction) {
        let prev_len = self.state.last_series_length;
        let points = series.points();

        let data = if points.len() > prev_len {
            // the old tail may have been finalized since it was sent
            let from = match prev_len.checked_sub(1) {
                Some(tail) if self.last_tail != Some(points[tail]) => tail,
                _ => prev_len,
            };
            DataAction::Append(points[from..].to_vec())
        } else {
            match points.last() {
                Some(last) => DataAction::ReplaceLast(*last),
                None => DataAction::None,
            }
        };

        let view = if self.state.is_locked() {
            ViewAction::Keep
        } else {
            ViewAction::ScrollToLiveEdge
        };
        (data, view)
    }

    // ── View events ─────────────────────────────────────────────────

    /// Apply a host view event. `bounds` describes the current data, if any.
    pub fn handle(&mut self, event: ViewEvent, bounds: Option<DataBounds>) -> ViewAction {
        let before = self.state.mode();
        let action = match event {
            ViewEvent::RangeChanged { range, zoom_factor } => {
                self.range_changed(range, zoom_factor, bounds);
                ViewAction::Keep
            }
            ViewEvent::Zoom(direction) => self.zoom(direction, bounds),
            ViewEvent::ResetView => {
                self.state.reset();
                ViewAction::ScrollToLiveEdge
            }
        };
        self.log_transition(before);
        action
    }

    /// Remember a range the session applied itself. No lock detection.
    pub fn note_visible_range(&mut self, range: TimeRange) {
        self.state.last_visible_range = Some(range);
        self.state.prev_range_width = Some(range.width());
    }

    fn range_changed(&mut self, range: TimeRange, zoom_factor: Option<f64>, bounds: Option<DataBounds>) {
        let width = range.width();

        if let Some(bounds) = bounds {
            let span = bounds.span() as f64;
            let lag = (bounds.latest - range.to) as f64;
            if span > 0.0 && lag > self.config.user_lock_lag_ratio * span {
                self.state.user_interacted = true;
                self.state.auto_scroll = false;
            }
        }

        let shrunk = self
            .state
            .prev_range_width
            .is_some_and(|prev| (width as f64) < self.config.zoom_in_shrink_ratio * prev as f64);
        let grew = self.state.prev_range_width.is_some_and(|prev| width > prev);
        if zoom_factor.is_some_and(|f| f > 1.0) || shrunk {
            self.state.is_zoomed_in = true;
        } else if zoom_factor.is_some_and(|f| f < 1.0) || (self.state.is_zoomed_in && grew) {
            self.maybe_unzoom(width, bounds);
        }

        self.state.last_visible_range = Some(range);
        self.state.prev_range_width = Some(width);
    }

    fn zoom(&mut self, direction: ZoomDirection, bounds: Option<DataBounds>) -> ViewAction {
        let Some(bounds) = bounds else {
            return ViewAction::Keep;
        };
        let current = self
            .state
            .last_visible_range
            .filter(TimeRange::is_valid)
            .unwrap_or_else(|| bounds.full_range());

        let step = self.config.zoom_step;
        let width = current.width() as f64;
        let new_width = match direction {
            ZoomDirection::In => (width / step).max(1.0),
            ZoomDirection::Out => (width * step).max(width + 1.0).min(bounds.span().max(1) as f64),
        }
        .round() as i64;

        // zoom around the right edge so the newest bars stay in view; past
        // the first bar, grow to the right instead
        let mut to = current.to.min(bounds.latest);
        let mut from = to - new_width;
        if from < bounds.start {
            from = bounds.start;
            to = (from + new_width).min(bounds.latest);
        }
        let range = TimeRange::new(from, to);
        if !range.is_valid() {
            trace!(?direction, "no room to zoom");
            return ViewAction::Keep;
        }

        match direction {
            ZoomDirection::In => self.state.is_zoomed_in = true,
            ZoomDirection::Out => self.maybe_unzoom(range.width(), Some(bounds)),
        }
        self.state.last_visible_range = Some(range);
        self.state.prev_range_width = Some(range.width());
        ViewAction::SetVisibleRange { range }
    }

    /// A zoom-out that shows (nearly) everything hands the viewport back to
    /// live data.
    fn maybe_unzoom(&mut self, width: i64, bounds: Option<DataBounds>) {
        let Some(bounds) = bounds else { return };
        let span = bounds.span() as f64;
        if width as f64 >= self.config.zoom_out_restore_ratio * span {
            self.state.is_zoomed_in = false;
            self.state.user_interacted = false;
            self.state.auto_scroll = true;
        }
    }

    fn log_transition(&self, before: ViewMode) {
        let after = self.state.mode();
        if before != after {
            debug!(?before, ?after, "view mode transition");
        } else {
            trace!(mode = ?after, "view mode unchanged");
        }
    }
}
