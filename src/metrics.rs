//! Loader observability.
//!
//! Counters for cache effectiveness and source activity. Each
//! [`TranslationLoader`](crate::loader::TranslationLoader) owns its own set,
//! so tests and tools read exactly the activity of the loader in hand
//! instead of whatever else ran in the process.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters owned by a single loader.
#[derive(Debug, Default)]
pub struct LoaderMetrics {
    /// Loads answered from the cache
    cache_hits: AtomicUsize,

    /// Loads that had to consult a source
    cache_misses: AtomicUsize,

    /// Load attempts against the local files (direct or as fallback)
    local_loads: AtomicUsize,

    /// Local load attempts that failed
    local_failures: AtomicUsize,

    /// Fetch attempts against the remote store
    remote_fetches: AtomicUsize,

    /// Remote fetches that failed
    remote_failures: AtomicUsize,

    /// Times a failed remote fetch fell back to the local files
    fallbacks: AtomicUsize,
}

impl LoaderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_local_load(&self) {
        self.local_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_local_failure(&self) {
        self.local_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_remote_fetch(&self) {
        self.remote_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_remote_failure(&self) {
        self.remote_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time view of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let cache_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            local_loads: self.local_loads.load(Ordering::Relaxed),
            local_failures: self.local_failures.load(Ordering::Relaxed),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of a loader's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Loads answered from the cache
    pub cache_hits: usize,

    /// Loads that had to consult a source
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    /// Load attempts against the local files
    pub local_loads: usize,

    /// Local load attempts that failed
    pub local_failures: usize,

    /// Fetch attempts against the remote store
    pub remote_fetches: usize,

    /// Remote fetches that failed
    pub remote_failures: usize,

    /// Times a failed remote fetch fell back to the local files
    pub fallbacks: usize,
}
