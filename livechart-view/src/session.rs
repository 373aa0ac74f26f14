//! One live chart instance.
//!
//! A [`ChartSession`] owns everything that belongs to a single chart: the
//! surface handle, the update engine and its view state, the indicator cache,
//! the marker overlay, the deferred scroll and the working series. Host events
//! come in as method calls; every call on a torn-down session is a no-op.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use livechart_core::domain::{
    IndicatorDescriptor, IndicatorId, PricePoint, Series, SeriesError,
};
use livechart_core::{CacheStats, CandleAggregator, IndicatorCache};

use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::engine::{DataAction, DataBounds, UpdateEngine, UpdatePlan, ViewAction, ViewEvent, ZoomDirection};
use crate::layout::{layout_panes, PaneLayout};
use crate::overlay::{OverlayRenderer, SourcedSignal};
use crate::surface::ChartSurface;
use crate::view_state::{TimeRange, ViewMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Area,
    Candlestick,
    Bar,
    Hollow,
}

impl ChartType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "area" | "line" => Some(Self::Area),
            "candlestick" | "candles" | "candle" => Some(Self::Candlestick),
            "bar" | "bars" | "ohlc" => Some(Self::Bar),
            "hollow" => Some(Self::Hollow),
            _ => None,
        }
    }

    /// Whether the surface is fed OHLC candles rather than line points.
    pub fn is_ohlc(&self) -> bool {
        !matches!(self, Self::Area)
    }

    /// The shape of `point` this chart type feeds to the surface.
    pub fn project(&self, point: &PricePoint) -> PricePoint {
        if !self.is_ohlc() {
            return point.to_line();
        }
        if point.has_ohlc() || point.is_malformed() {
            return *point;
        }
        let (o, h, l, c) = point.ohlc();
        PricePoint::candle(point.time, o, h, l, c)
    }
}

pub struct ChartSession<S: ChartSurface> {
    surface: Option<S>,
    chart_type: ChartType,
    config: ViewConfig,
    engine: UpdateEngine,
    cache: IndicatorCache,
    descriptors: Vec<IndicatorDescriptor>,
    overlay: OverlayRenderer,
    scroll: Debouncer<()>,
    series: Series,
    signals: Vec<SourcedSignal>,
    aggregator: Option<CandleAggregator>,
    height: f64,
    layout: PaneLayout,
}

impl<S: ChartSurface> ChartSession<S> {
    pub fn new(surface: S, chart_type: ChartType, config: ViewConfig, height: f64) -> Self {
        let layout = layout_panes(height, &[], &config);
        Self {
            surface: Some(surface),
            chart_type,
            engine: UpdateEngine::new(config.clone()),
            scroll: Debouncer::new(config.scroll_debounce_ms),
            config,
            cache: IndicatorCache::new(),
            descriptors: Vec::new(),
            overlay: OverlayRenderer::new(),
            series: Series::new(),
            signals: Vec::new(),
            aggregator: None,
            height,
            layout,
        }
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    pub fn mode(&self) -> ViewMode {
        self.engine.mode()
    }

    pub fn engine(&self) -> &UpdateEngine {
        &self.engine
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Current signals of every indicator, tagged with their source.
    pub fn signals(&self) -> &[SourcedSignal] {
        &self.signals
    }

    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn scroll_pending(&self) -> bool {
        self.scroll.is_pending()
    }

    // ── Indicators ──────────────────────────────────────────────────

    /// Replace the active indicator list. Removed ids lose their visuals and
    /// cache entries; new or changed ones are computed right away.
    pub fn set_indicators(&mut self, descriptors: Vec<IndicatorDescriptor>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let removed: Vec<IndicatorId> = self
            .descriptors
            .iter()
            .filter(|old| !descriptors.iter().any(|d| d.id == old.id))
            .map(|old| old.id.clone())
            .collect();
        for id in &removed {
            surface.remove_indicator(id);
            self.cache.remove(id);
        }
        debug!(active = descriptors.len(), removed = removed.len(), "indicator list replaced");

        self.descriptors = descriptors;
        self.relayout();
        self.refresh_indicators();
        self.redraw_markers();
    }

    fn refresh_indicators(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if self.series.is_empty() {
            return;
        }

        let results = self.cache.sync(&self.series, &self.descriptors);
        let mut signals = Vec::new();
        for (descriptor, (_, lookup)) in self.descriptors.iter().zip(&results) {
            if let Some(found) = lookup.output.signals() {
                signals.extend(found.iter().map(|&signal| SourcedSignal {
                    source: descriptor.id.clone(),
                    signal,
                }));
            } else if !lookup.hit {
                surface.set_indicator(&descriptor.id, descriptor.location, &lookup.output);
            }
        }
        signals.sort_by(|a, b| {
            (a.signal.time, a.signal.direction, &a.source)
                .cmp(&(b.signal.time, b.signal.direction, &b.source))
        });
        self.signals = signals;
    }

    // ── Data ────────────────────────────────────────────────────────

    /// Feed a full snapshot of the working series.
    pub fn on_snapshot(&mut self, series: Series, now_ms: u64) -> Option<UpdatePlan> {
        if !self.is_active() {
            return None;
        }
        let plan = self.engine.apply_snapshot(&series);

        if let Some(surface) = self.surface.as_mut() {
            match &plan.data {
                DataAction::Reset(points) => {
                    let projected: Vec<PricePoint> =
                        points.iter().map(|p| self.chart_type.project(p)).collect();
                    surface.set_data(&projected);
                }
                DataAction::Append(points) => {
                    for p in points {
                        surface.update(self.chart_type.project(p));
                    }
                }
                DataAction::ReplaceLast(p) => surface.update(self.chart_type.project(p)),
                DataAction::None => {}
            }
        }

        self.aggregator = match (self.chart_type.is_ohlc(), series.last()) {
            (true, Some(last)) => Some(CandleAggregator::resume(self.config.candle_granularity, *last)),
            _ => None,
        };
        self.series = series;

        self.apply_view(plan.view, now_ms);
        self.refresh_indicators();
        self.redraw_markers();
        Some(plan)
    }

    /// Fold one live tick into the working series and apply the result.
    /// Candle chart types bucket ticks into candles first.
    pub fn on_tick(
        &mut self,
        time: i64,
        value: f64,
        now_ms: u64,
    ) -> Result<Option<UpdatePlan>, SeriesError> {
        if !self.is_active() {
            return Ok(None);
        }
        let mut next = self.series.clone();
        let pushed = if self.chart_type.is_ohlc() {
            let granularity = self.config.candle_granularity;
            self.aggregator
                .get_or_insert_with(|| CandleAggregator::new(granularity))
                .feed(&mut next, time, value)
        } else {
            next.push(PricePoint::tick(time, value))
        };
        if let Err(err) = pushed {
            warn!(time, value, %err, "live tick rejected");
            return Err(err);
        }
        Ok(self.on_snapshot(next, now_ms))
    }

    // ── View ────────────────────────────────────────────────────────

    /// The surface reports a new visible range (user pan or zoom gesture).
    pub fn on_visible_range_changed(&mut self, range: TimeRange, zoom_factor: Option<f64>) {
        if !self.is_active() {
            return;
        }
        let bounds = DataBounds::of(&self.series);
        self.engine.handle(ViewEvent::RangeChanged { range, zoom_factor }, bounds);
        self.redraw_markers();
    }

    pub fn on_resize(&mut self, height: f64) {
        if !self.is_active() {
            return;
        }
        self.height = height;
        self.relayout();
        self.redraw_markers();
    }

    pub fn zoom(&mut self, direction: ZoomDirection, now_ms: u64) {
        if !self.is_active() {
            return;
        }
        let action = self.engine.handle(ViewEvent::Zoom(direction), DataBounds::of(&self.series));
        self.apply_view(action, now_ms);
        self.redraw_markers();
    }

    /// Drop every interaction flag and jump to live data.
    pub fn reset_view(&mut self, now_ms: u64) {
        if !self.is_active() {
            return;
        }
        self.scroll.cancel();
        let action = self.engine.handle(ViewEvent::ResetView, DataBounds::of(&self.series));
        self.apply_view(action, now_ms);
        self.redraw_markers();
    }

    /// Run the deferred scroll if it is due. Returns whether it ran.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.is_active() || self.scroll.poll(now_ms).is_none() {
            return false;
        }
        // the user may have taken over since the scroll was scheduled
        if self.engine.state().is_locked() {
            debug!("deferred scroll dropped, view is locked");
            return false;
        }
        self.apply_view(ViewAction::ScrollToLiveEdge, now_ms);
        self.redraw_markers();
        true
    }

    /// Detach from the surface. Pending work is cancelled, view state and
    /// cached output are discarded, and the surface is handed back.
    pub fn teardown(&mut self) -> Option<S> {
        let surface = self.surface.take()?;
        self.scroll.cancel();
        self.cache.clear();
        self.overlay = OverlayRenderer::new();
        self.engine = UpdateEngine::new(self.config.clone());
        self.aggregator = None;
        self.signals.clear();
        debug!(points = self.series.len(), "chart session torn down");
        Some(surface)
    }

    // ── Helpers ─────────────────────────────────────────────────────

    fn apply_view(&mut self, action: ViewAction, now_ms: u64) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match action {
            ViewAction::Keep => {}
            ViewAction::ScheduleScroll => self.scroll.schedule(now_ms, ()),
            ViewAction::ScrollToLiveEdge => {
                self.scroll.cancel();
                surface.scroll_to_live_edge();
                if let Some(range) = surface.visible_range() {
                    self.engine.note_visible_range(range);
                }
            }
            ViewAction::SetVisibleRange { range } => {
                surface.set_visible_range(range);
                self.engine.note_visible_range(range);
            }
        }
    }

    fn relayout(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let layout = layout_panes(self.height, &self.descriptors, &self.config);
        if layout != self.layout {
            surface.set_pane_layout(&layout);
            self.layout = layout;
        }
    }

    fn redraw_markers(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let desired = OverlayRenderer::layout_markers(&self.signals, &*surface);
        let diff = self.overlay.reconcile(desired);
        if !diff.is_empty() {
            surface.apply_markers(&diff);
        }
    }
}
