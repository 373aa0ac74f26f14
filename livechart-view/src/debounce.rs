//! Single-slot deferred action driven by a caller-supplied clock.
//!
//! The host owns time: it passes `now_ms` to [`Debouncer::schedule`] and
//! later to [`Debouncer::poll`]. Scheduling again replaces the pending action
//! and restarts the delay.

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn schedule(&mut self, now_ms: u64, action: T) {
        self.pending = Some((now_ms.saturating_add(self.delay_ms), action));
    }

    /// Take the pending action if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if now_ms >= deadline => self.pending.take().map(|(_, a)| a),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, a)| a)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(d, _)| *d)
    }
}
