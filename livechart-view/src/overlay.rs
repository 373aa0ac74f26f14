//! Signal markers placed in surface coordinates.
//!
//! [`OverlayRenderer::layout_markers`] maps every signal through the
//! surface's coordinate mappers; [`OverlayRenderer::reconcile`] diffs the
//! result against what is currently drawn so only changed markers are touched.
//! A marker is identified by its time, its kind and the indicator that raised
//! it, so two indicators signalling on the same bar draw two markers.
//! Layout runs again on new signals, visible-range changes and resizes, since
//! any of those moves every marker.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use livechart_core::domain::{IndicatorId, Signal, SignalDirection};

use crate::surface::CoordinateMapper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Buy,
    Sell,
}

impl From<SignalDirection> for MarkerKind {
    fn from(direction: SignalDirection) -> Self {
        match direction {
            SignalDirection::Long => Self::Buy,
            SignalDirection::Short => Self::Sell,
        }
    }
}

/// A signal tagged with the indicator that raised it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcedSignal {
    pub source: IndicatorId,
    #[serde(flatten)]
    pub signal: Signal,
}

/// One absolutely positioned marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub source: IndicatorId,
    pub time: i64,
    pub x: f64,
    pub y: f64,
    pub kind: MarkerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sl: Option<f64>,
}

impl Marker {
    pub fn key(&self) -> MarkerKey {
        MarkerKey {
            time: self.time,
            kind: self.kind,
            source: self.source.clone(),
        }
    }
}

/// Identity of a marker across redraws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerKey {
    pub time: i64,
    pub kind: MarkerKind,
    pub source: IndicatorId,
}

/// Minimal set of mutations turning the drawn markers into the desired ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerDiff {
    pub added: Vec<Marker>,
    pub moved: Vec<Marker>,
    pub removed: Vec<MarkerKey>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.moved.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    drawn: BTreeMap<MarkerKey, Marker>,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> impl Iterator<Item = &Marker> {
        self.drawn.values()
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    /// Map signals to markers. Signals whose time or price the surface cannot
    /// place (off-range, surface gone) are skipped.
    pub fn layout_markers(signals: &[SourcedSignal], mapper: &impl CoordinateMapper) -> Vec<Marker> {
        signals
            .iter()
            .filter_map(|SourcedSignal { source, signal: s }| {
                Some(Marker {
                    source: source.clone(),
                    time: s.time,
                    x: mapper.time_to_x(s.time)?,
                    y: mapper.price_to_y(s.price)?,
                    kind: s.direction.into(),
                    tp: s.tp,
                    sl: s.sl,
                })
            })
            .collect()
    }

    /// Diff `desired` against the drawn set and adopt it.
    pub fn reconcile(&mut self, desired: Vec<Marker>) -> MarkerDiff {
        let mut next: BTreeMap<MarkerKey, Marker> = BTreeMap::new();
        for marker in desired {
            next.insert(marker.key(), marker);
        }

        let mut diff = MarkerDiff::default();
        for (key, marker) in &next {
            match self.drawn.get(key) {
                None => diff.added.push(marker.clone()),
                Some(old) if old != marker => diff.moved.push(marker.clone()),
                Some(_) => {}
            }
        }
        diff.removed = self
            .drawn
            .keys()
            .filter(|k| !next.contains_key(k))
            .cloned()
            .collect();

        trace!(
            added = diff.added.len(),
            moved = diff.moved.len(),
            removed = diff.removed.len(),
            "markers reconciled"
        );
        self.drawn = next;
        diff
    }

    /// Forget every marker, returning the removals needed to clear the surface.
    pub fn clear(&mut self) -> MarkerDiff {
        self.reconcile(Vec::new())
    }
}
