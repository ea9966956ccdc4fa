//! LIRS Cache Metrics
//!
//! Metrics specific to the LIRS (Low Inter-reference Recency Set) cache
//! algorithm: movement between the LIR and HIR sets and the lifecycle of
//! non-resident shadows in stack S.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LIRS-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone)]
pub struct LirsCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// HIR blocks promoted to LIR on re-reference
    pub promotions: u64,

    /// LIR blocks demoted to HIR when the LIR set overflowed
    pub demotions: u64,

    /// Resident HIR blocks that lost their value but kept a shadow in S
    pub shadow_conversions: u64,

    /// Non-resident shadows dropped from the bottom of stack S
    pub shadow_prunes: u64,
}

impl LirsCacheMetrics {
    /// Creates a new LirsCacheMetrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a HIR-to-LIR promotion.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a LIR-to-HIR demotion.
    pub fn record_demotion(&mut self) {
        self.demotions += 1;
    }

    /// Records a resident HIR block turning into a non-resident shadow.
    pub fn record_shadow_conversion(&mut self) {
        self.shadow_conversions += 1;
    }

    /// Records a non-resident shadow pruned from the bottom of stack S.
    pub fn record_shadow_prune(&mut self) {
        self.shadow_prunes += 1;
    }

    /// Converts LIRS metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert("demotions".to_string(), self.demotions as f64);
        metrics.insert(
            "shadow_conversions".to_string(),
            self.shadow_conversions as f64,
        );
        metrics.insert("shadow_prunes".to_string(), self.shadow_prunes as f64);

        metrics
    }
}

impl CacheMetrics for LirsCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LIRS"
    }
}
