//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm:
//! frequency movement across the bucket list.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Total number of frequency increments (every hit on a resident item)
    pub frequency_increments: u64,

    /// Highest frequency observed so far
    pub max_frequency: u64,
}

impl LfuCacheMetrics {
    /// Creates a new LfuCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment caused by a hit.
    ///
    /// `new_frequency` is the item's frequency after the touch; at the
    /// saturation point the frequency stays put and only the increment
    /// counter moves.
    pub fn record_frequency_increment(&mut self, new_frequency: usize) {
        self.frequency_increments += 1;

        let freq = new_frequency as u64;
        if freq > self.max_frequency {
            self.max_frequency = freq;
        }
    }

    /// Converts LFU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert(
            "frequency_increments".to_string(),
            self.frequency_increments as f64,
        );
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
