//! SLRU Cache Metrics
//!
//! Metrics specific to the SLRU (Segmented Least Recently Used) cache
//! algorithm: segment hit split and promotion/demotion traffic.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// SLRU-specific metrics (extends CoreCacheMetrics)
///
/// SLRU divides the cache into probation and protected segments, so these
/// metrics track where hits land and how entries move between segments.
#[derive(Debug, Default, Clone)]
pub struct SlruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of cache hits in the probation segment
    pub probation_hits: u64,

    /// Number of cache hits in the protected segment
    pub protected_hits: u64,

    /// Total number of promotions from probation to protected
    pub promotions: u64,

    /// Total number of demotions from protected back to probation
    pub demotions: u64,
}

impl SlruCacheMetrics {
    /// Creates a new SlruCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit in the probation segment.
    pub fn record_probation_hit(&mut self) {
        self.core.record_hit();
        self.probation_hits += 1;
    }

    /// Records a cache hit in the protected segment.
    pub fn record_protected_hit(&mut self) {
        self.core.record_hit();
        self.protected_hits += 1;
    }

    /// Records a promotion from probation to protected.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a demotion from protected to probation.
    pub fn record_demotion(&mut self) {
        self.demotions += 1;
    }

    /// Calculates the protection ratio (protected hits / total hits).
    pub fn protection_ratio(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.protected_hits as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Converts SLRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("probation_hits".to_string(), self.probation_hits as f64);
        metrics.insert("protected_hits".to_string(), self.protected_hits as f64);
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert("demotions".to_string(), self.demotions as f64);
        metrics.insert("protection_ratio".to_string(), self.protection_ratio());

        metrics
    }
}

impl CacheMetrics for SlruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "SLRU"
    }
}
