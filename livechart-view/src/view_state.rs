//! Per-chart view state.
//!
//! A handful of flags plus what the engine remembers about the last snapshot
//! and the last visible range. The four view modes are derived from the
//! flags rather than stored, so they cannot drift apart.

use serde::{Deserialize, Serialize};

/// A visible time window, inclusive on both ends, in series time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    pub fn width(&self) -> i64 {
        self.to - self.from
    }

    /// Non-empty and not inverted.
    pub fn is_valid(&self) -> bool {
        self.from < self.to
    }

    pub fn shift(&self, delta: i64) -> Self {
        Self::new(self.from + delta, self.to + delta)
    }

    /// Clamp both ends into `[start, end]` (bounds given in either order).
    pub fn clamp(&self, start: i64, end: i64) -> Self {
        let (lo, hi) = (start.min(end), start.max(end));
        Self::new(self.from.clamp(lo, hi), self.to.clamp(lo, hi))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// No snapshot seen yet.
    Initial,
    AutoFollowing,
    UserLocked,
    ZoomedLocked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub auto_scroll: bool,
    pub user_interacted: bool,
    pub is_zoomed_in: bool,
    pub prev_range_width: Option<i64>,
    pub last_series_start_time: Option<i64>,
    pub last_series_length: usize,
    pub last_visible_range: Option<TimeRange>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            user_interacted: false,
            is_zoomed_in: false,
            prev_range_width: None,
            last_series_start_time: None,
            last_series_length: 0,
            last_visible_range: None,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        if self.is_zoomed_in {
            ViewMode::ZoomedLocked
        } else if self.user_interacted || !self.auto_scroll {
            ViewMode::UserLocked
        } else if self.last_series_start_time.is_none() {
            ViewMode::Initial
        } else {
            ViewMode::AutoFollowing
        }
    }

    /// True when live data must not move the viewport.
    pub fn is_locked(&self) -> bool {
        self.user_interacted || self.is_zoomed_in || !self.auto_scroll
    }

    /// Clear every interaction flag and follow live data again. What the
    /// engine knows about the current data is kept.
    pub fn reset(&mut self) {
        self.auto_scroll = true;
        self.user_interacted = false;
        self.is_zoomed_in = false;
        self.prev_range_width = None;
        self.last_visible_range = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_initial() {
        let s = ViewState::new();
        assert_eq!(s.mode(), ViewMode::Initial);
        assert!(!s.is_locked());
    }

    #[test]
    fn modes_follow_flags() {
        let mut s = ViewState::new();
        s.last_series_start_time = Some(0);
        assert_eq!(s.mode(), ViewMode::AutoFollowing);

        s.user_interacted = true;
        s.auto_scroll = false;
        assert_eq!(s.mode(), ViewMode::UserLocked);

        s.is_zoomed_in = true;
        assert_eq!(s.mode(), ViewMode::ZoomedLocked);

        s.reset();
        assert_eq!(s.mode(), ViewMode::AutoFollowing);
        assert_eq!(s.last_series_start_time, Some(0));
    }

    #[test]
    fn range_shift_and_clamp() {
        let r = TimeRange::new(10, 20).shift(5);
        assert_eq!(r, TimeRange::new(15, 25));
        assert_eq!(r.clamp(0, 22), TimeRange::new(15, 22));
        assert!(!TimeRange::new(30, 30).is_valid());
        assert!(!r.clamp(40, 50).is_valid());
    }
}
