//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LfuCacheConfig;
//! use policy_cache::LfuCache;
//!
//! let config = LfuCacheConfig { capacity: 100 };
//! let cache: LfuCache<String, i32> = LfuCache::init(config).unwrap();
//! ```

use core::num::NonZeroUsize;

use crate::error::CacheError;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU evicts the item with the lowest access count; among items with the
/// same count, the oldest one goes first.
#[derive(Debug, Clone, Copy)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl LfuCacheConfig {
    /// Validates the configuration and returns the entry capacity.
    pub fn capacity(&self) -> Result<NonZeroUsize, CacheError> {
        NonZeroUsize::new(self.capacity)
            .ok_or(CacheError::InvalidArgument("capacity should be larger than 0"))
    }
}
