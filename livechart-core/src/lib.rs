//! LiveChart Core: indicator math, compute dispatch, signal engines, output cache.
//!
//! This crate contains everything a live chart derives from a price series:
//! - Domain types (price points, series, descriptors, outputs, signals)
//! - Series math library: one pure function per indicator family
//! - Catalog: descriptor → typed spec → derived output
//! - Pattern engines (Heiken-Ashi/baseline, engulfing)
//! - Per-chart output cache keyed by content hash
//! - Tick → candle aggregation
//!
//! Nothing here performs I/O or owns a timer; the view layer drives it.

pub mod aggregate;
pub mod cache;
pub mod catalog;
pub mod domain;
pub mod indicators;
pub mod signals;

pub use aggregate::CandleAggregator;
pub use cache::{CacheLookup, CacheStats, IndicatorCache};
pub use catalog::{compute_indicator, IndicatorSpec};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types can move to another thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<domain::IndicatorDescriptor>();
        require_sync::<domain::IndicatorDescriptor>();
        require_send::<domain::IndicatorOutput>();
        require_sync::<domain::IndicatorOutput>();
        require_send::<IndicatorCache>();
        require_sync::<IndicatorCache>();
        require_send::<IndicatorSpec>();
        require_sync::<IndicatorSpec>();
        require_send::<CandleAggregator>();
        require_sync::<CandleAggregator>();
    }
}
