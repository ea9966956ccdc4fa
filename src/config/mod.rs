//! Cache Configuration Module
//!
//! This module provides configuration structures for all cache algorithm
//! implementations. Each cache type has its own dedicated configuration
//! struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Validated at construction**: The cache constructor asks the config
//!   for its derived budgets, which is where out-of-range parameters are
//!   rejected with [`CacheError::InvalidArgument`](crate::CacheError)
//! - **No boilerplate**: No builder methods needed
//!
//! # Configs
//!
//! | Config | Cache | Parameters |
//! |--------|-------|------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | `capacity` |
//! | `SlruCacheConfig` | [`SlruCache`](crate::SlruCache) | `capacity`, `probation_ratio` |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | `capacity` |
//! | `LirsCacheConfig` | [`LirsCache`](crate::LirsCache) | `capacity`, `hirs_ratio` |
//!
//! # Examples
//!
//! ```
//! use policy_cache::config::SlruCacheConfig;
//! use policy_cache::SlruCache;
//!
//! let config = SlruCacheConfig {
//!     capacity: 10,
//!     probation_ratio: 0.2,
//! };
//!
//! let cache: SlruCache<i32, i32> = SlruCache::init(config).unwrap();
//! ```

pub mod lfu;
pub mod lirs;
pub mod lru;
pub mod slru;

pub use lfu::LfuCacheConfig;
pub use lirs::LirsCacheConfig;
pub use lru::LruCacheConfig;
pub use slru::SlruCacheConfig;
