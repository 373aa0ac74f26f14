//! Per-chart indicator output cache.
//!
//! Entries are keyed by indicator id and tagged with a content hash of
//! `(series, descriptor)`. A lookup whose hash matches the stored tag is a
//! hit; anything else recomputes and replaces the entry. Ids that leave the
//! active descriptor list are evicted by [`IndicatorCache::sync`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::catalog::compute_indicator;
use crate::domain::{ContentHash, IndicatorDescriptor, IndicatorId, IndicatorOutput, Series};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Result of a cache lookup.
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub output: Arc<IndicatorOutput>,
    /// False when the output was (re)computed by this lookup.
    pub hit: bool,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    key: ContentHash,
    output: Arc<IndicatorOutput>,
}

#[derive(Debug, Default)]
pub struct IndicatorCache {
    entries: HashMap<IndicatorId, CacheEntry>,
    stats: CacheStats,
}

impl IndicatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn get(&self, id: &IndicatorId) -> Option<Arc<IndicatorOutput>> {
        self.entries.get(id).map(|e| Arc::clone(&e.output))
    }

    /// Cache key of one `(series, descriptor)` pair.
    pub fn key(series_hash: &ContentHash, descriptor: &IndicatorDescriptor) -> ContentHash {
        ContentHash::combine(&[series_hash, &descriptor.content_hash()])
    }

    pub fn get_or_compute(
        &mut self,
        series: &Series,
        descriptor: &IndicatorDescriptor,
    ) -> CacheLookup {
        let series_hash = series.content_hash();
        self.get_or_compute_hashed(series, &series_hash, descriptor)
    }

    /// Same as [`get_or_compute`](Self::get_or_compute) with the series hash
    /// supplied by the caller, so a batch hashes the series once.
    pub fn get_or_compute_hashed(
        &mut self,
        series: &Series,
        series_hash: &ContentHash,
        descriptor: &IndicatorDescriptor,
    ) -> CacheLookup {
        let key = Self::key(series_hash, descriptor);

        if let Some(entry) = self.entries.get(&descriptor.id) {
            if entry.key == key {
                self.stats.hits += 1;
                trace!(id = %descriptor.id, "indicator cache hit");
                return CacheLookup {
                    output: Arc::clone(&entry.output),
                    hit: true,
                };
            }
        }

        self.stats.misses += 1;
        debug!(id = %descriptor.id, kind = %descriptor.kind, points = series.len(), "indicator cache miss");
        let output = Arc::new(compute_indicator(series, descriptor));
        self.entries.insert(
            descriptor.id.clone(),
            CacheEntry {
                key,
                output: Arc::clone(&output),
            },
        );
        CacheLookup { output, hit: false }
    }

    /// Compute every active descriptor against one snapshot and evict entries
    /// for ids no longer in the list. Results follow descriptor order.
    pub fn sync(
        &mut self,
        series: &Series,
        descriptors: &[IndicatorDescriptor],
    ) -> Vec<(IndicatorId, CacheLookup)> {
        let active: HashSet<&IndicatorId> = descriptors.iter().map(|d| &d.id).collect();
        self.retain(|id| active.contains(id));

        let series_hash = series.content_hash();
        descriptors
            .iter()
            .map(|d| (d.id.clone(), self.get_or_compute_hashed(series, &series_hash, d)))
            .collect()
    }

    /// Keep only entries whose id passes `keep`. Returns the evicted count.
    pub fn retain(&mut self, mut keep: impl FnMut(&IndicatorId) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| keep(id));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            self.stats.evictions += evicted as u64;
            debug!(evicted, "indicator cache eviction");
        }
        evicted
    }

    pub fn remove(&mut self, id: &IndicatorId) -> bool {
        let removed = self.entries.remove(id).is_some();
        if removed {
            self.stats.evictions += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
