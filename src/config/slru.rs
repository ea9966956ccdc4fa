//! Configuration for the Segmented Least Recently Used (SLRU) cache.
//!
//! SLRU divides the cache into a probation segment for new entries and a
//! protected segment for entries hit at least twice. `probation_ratio`
//! controls the split: the probation segment gets
//! `floor(capacity * probation_ratio)` entries and the protected segment the
//! remainder. Both segments must end up with at least one entry, which bounds
//! the acceptable ratios for a given capacity (e.g. `capacity = 10`,
//! `ratio = 0.2` gives 2 + 8; `capacity = 1` admits no valid ratio).
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::SlruCacheConfig;
//! use policy_cache::SlruCache;
//!
//! // 20% probation is the classic split.
//! let config = SlruCacheConfig {
//!     capacity: 1000,
//!     probation_ratio: 0.2,
//! };
//! let cache: SlruCache<String, i32> = SlruCache::init(config).unwrap();
//! ```

use core::num::NonZeroUsize;

use crate::error::CacheError;

/// Configuration for an SLRU (Segmented LRU) cache.
#[derive(Debug, Clone, Copy)]
pub struct SlruCacheConfig {
    /// Total capacity of the cache (probation + protected).
    pub capacity: usize,
    /// Fraction of `capacity` assigned to the probation segment.
    pub probation_ratio: f64,
}

impl SlruCacheConfig {
    /// Validates the configuration and returns the
    /// `(probation, protected)` segment capacities.
    pub fn segment_capacities(&self) -> Result<(NonZeroUsize, NonZeroUsize), CacheError> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "capacity should be larger than 0",
            ));
        }

        if !(0.0..=1.0).contains(&self.probation_ratio) {
            return Err(CacheError::InvalidArgument(
                "probation ratio should be in (0, 1)",
            ));
        }

        let probation = (self.capacity as f64 * self.probation_ratio) as usize;
        let protected = self.capacity - probation;

        match (NonZeroUsize::new(probation), NonZeroUsize::new(protected)) {
            (Some(probation), Some(protected)) => Ok((probation, protected)),
            _ => Err(CacheError::InvalidArgument("invalid probation_ratio")),
        }
    }
}
