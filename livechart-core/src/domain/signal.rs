//! Trading signals emitted by the pattern engines.

use serde::{Deserialize, Serialize};

/// Directional intent of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Long,
    Short,
}

impl SignalDirection {
    pub fn opposite(self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }
}

/// A timestamped long/short signal with optional exit levels.
///
/// Holding a single `direction` makes "long and short on the same bar"
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub index: usize,
    pub time: i64,
    pub direction: SignalDirection,
    /// Reference price (the bar close).
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sl: Option<f64>,
}

impl Signal {
    pub fn is_long(&self) -> bool {
        self.direction == SignalDirection::Long
    }

    pub fn is_short(&self) -> bool {
        self.direction == SignalDirection::Short
    }
}
