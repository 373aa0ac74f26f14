//! Pane height partitioning.
//!
//! The main price pane plus one pane per pane-located indicator share the
//! container height. Each section gets at least `min_pane_height`; when the
//! container is too small for that, every section gets an equal share instead
//! so the total never exceeds what is available.

use serde::Serialize;

use livechart_core::domain::{IndicatorDescriptor, IndicatorId, IndicatorType, Location};

use crate::config::{ScaleMargins, ViewConfig};

/// One indicator pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaneSlot {
    pub id: IndicatorId,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<ScaleMargins>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_lines: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaneLayout {
    pub main: f64,
    pub panes: Vec<PaneSlot>,
}

impl PaneLayout {
    pub fn total(&self) -> f64 {
        self.main + self.panes.iter().map(|p| p.height).sum::<f64>()
    }
}

/// Partition `available` pixels between the price pane and the pane-located
/// descriptors. Overlay descriptors are ignored.
pub fn layout_panes(
    available: f64,
    descriptors: &[IndicatorDescriptor],
    config: &ViewConfig,
) -> PaneLayout {
    let available = available.max(0.0);
    let panes: Vec<&IndicatorDescriptor> = descriptors
        .iter()
        .filter(|d| d.location == Location::Pane)
        .collect();
    let n = panes.len() as f64;
    let min = config.min_pane_height;

    let pane_height = if panes.is_empty() {
        0.0
    } else if min * (n + 1.0) > available {
        available / (n + 1.0)
    } else {
        let preferred = (available * config.pane_share).max(min);
        if available - n * preferred < min {
            (available - min) / n
        } else {
            preferred
        }
    };

    PaneLayout {
        main: available - n * pane_height,
        panes: panes
            .into_iter()
            .map(|d| slot(d, pane_height, config))
            .collect(),
    }
}

fn slot(descriptor: &IndicatorDescriptor, height: f64, config: &ViewConfig) -> PaneSlot {
    let (margins, reference_lines) = match descriptor.kind {
        IndicatorType::Rsi => (Some(config.rsi_margins), vec![30.0, 70.0]),
        IndicatorType::Stochastic => (None, vec![20.0, 80.0]),
        IndicatorType::WilliamsR => (None, vec![-20.0, -80.0]),
        _ => (None, Vec::new()),
    };
    PaneSlot {
        id: descriptor.id.clone(),
        height,
        margins,
        reference_lines,
    }
}
