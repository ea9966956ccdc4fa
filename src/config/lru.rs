//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::LruCacheConfig;
//! use policy_cache::LruCache;
//!
//! let config = LruCacheConfig { capacity: 100 };
//! let cache: LruCache<String, i32> = LruCache::init(config).unwrap();
//! ```

use core::num::NonZeroUsize;

use crate::error::CacheError;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed item when the cache reaches
/// capacity. Capacity is a number of entries; zero is rejected at
/// construction.
#[derive(Debug, Clone, Copy)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Validates the configuration and returns the entry capacity.
    pub fn capacity(&self) -> Result<NonZeroUsize, CacheError> {
        NonZeroUsize::new(self.capacity)
            .ok_or(CacheError::InvalidArgument("capacity should be larger than 0"))
    }
}
