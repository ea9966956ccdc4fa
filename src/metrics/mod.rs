//! Cache Metrics System
//!
//! Provides a flexible metrics system for cache algorithms using BTreeMap-based
//! metrics reporting. Each cache algorithm can track its own specific metrics
//! while implementing a common CacheMetrics trait.
//!
//! All counters are in units of entries and events; the caches themselves are
//! entry-counted, so there is no byte accounting here. Metrics are purely
//! observational and never influence replacement decisions.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several reasons:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for testing and benchmark comparisons
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The performance difference (O(log n) vs O(1)) is negligible with ~10 metric
//! keys, but the deterministic behavior is invaluable when diffing runs.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;
pub mod lirs;
pub mod lru;
pub mod slru;

pub use lfu::LfuCacheMetrics;
pub use lirs::LirsCacheMetrics;
pub use lru::LruCacheMetrics;
pub use slru::SlruCacheMetrics;

/// Common metrics tracked by all cache algorithms
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of requests (gets) made to the cache
    pub requests: u64,

    /// Number of requests that resulted in cache hits
    pub cache_hits: u64,

    /// Number of entries written into the cache (inserts and updates)
    pub insertions: u64,

    /// Number of entries evicted from the cache due to capacity constraints
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss.
    ///
    /// Misses are derivable as `requests - cache_hits`; only the request
    /// counter moves here.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an insertion or in-place update.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an eviction caused by capacity pressure.
    ///
    /// Explicit deletes are not evictions and are not counted.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Calculates the cache hit rate.
    ///
    /// Returns a value between 0.0 and 1.0, or 0.0 before the first request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the cache miss rate.
    ///
    /// Returns a value between 0.0 and 1.0, or 0.0 before the first request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts core metrics to a BTreeMap for reporting.
    ///
    /// Uses BTreeMap to ensure deterministic, consistent ordering of metrics.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all cache algorithms implement for metrics reporting.
///
/// Provides a uniform interface for retrieving metrics from any cache
/// implementation, with BTreeMap guaranteeing deterministic key ordering.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification (e.g. "LRU", "LIRS").
    fn algorithm_name(&self) -> &'static str;
}
