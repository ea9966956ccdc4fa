#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Algorithm Selection Guide
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │              Which Cache Algorithm Should I Use?               │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  Recent items stay hot?  ──▶  Worried about scans?             │
//! │                                │                               │
//! │                           Yes  │  No                           │
//! │                            ▼   ▼                               │
//! │                        ┌──────────┐  ┌──────────┐              │
//! │                        │   SLRU   │  │   LRU    │              │
//! │                        └──────────┘  └──────────┘              │
//! │                                                                │
//! │  Popular items stay hot?  ──▶  ┌──────────┐                    │
//! │                                │   LFU    │                    │
//! │                                └──────────┘                    │
//! │                                                                │
//! │  Loops/scans larger than the cache?  ──▶  ┌──────────┐         │
//! │                                           │   LIRS   │         │
//! │                                           └──────────┘         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Performance Characteristics
//!
//! | Algorithm | Get | Set | Del | Scan Resist | Extra state |
//! |-----------|-----|-----|-----|-------------|-------------|
//! | LRU       | O(1)| O(1)| O(1)| Poor        | none |
//! | SLRU      | O(1)| O(1)| O(1)| Good        | none |
//! | LFU       | O(1)| O(1)| O(1)| Excellent   | frequency buckets |
//! | LIRS      | O(1)| O(1)| O(1)| Excellent   | bounded non-resident shadows |
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache implementation
//! - [`slru`]: Segmented LRU cache implementation
//! - [`lfu`]: Least Frequently Used cache implementation
//! - [`lirs`]: Low Inter-reference Recency Set cache implementation
//! - [`config`]: Configuration structures for all cache algorithms
//! - [`error`]: Construction error type
//! - [`metrics`]: Metrics collection for cache behaviour observation

#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Construction error type shared by all caches.
pub mod error;

/// Doubly linked list implementation with in-place editing capabilities.
///
/// This module provides a memory-efficient doubly linked list that allows for
/// efficient insertion, removal, and reordering operations.
///
/// **Note**: This module is internal infrastructure and should not be used
/// directly by library consumers. It exposes unsafe raw pointer operations
/// that require careful invariant maintenance. Use the high-level cache
/// implementations instead.
pub(crate) mod list;

/// Cache configuration structures.
///
/// Provides configuration structures for all cache algorithm implementations.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached. Also hosts the recency core reused by the
/// segmented policy.
pub mod lru;

/// Segmented LRU (SLRU) cache implementation.
///
/// Provides a fixed-size cache with a probation and a protected segment,
/// promoting items on their second reference. This is useful for scenarios
/// where one-time scans should not displace the working set.
pub mod slru;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached, in O(1) per operation via a linked list of
/// frequency buckets.
pub mod lfu;

/// Low Inter-reference Recency Set (LIRS) cache implementation.
///
/// Provides a fixed-size cache that tracks reuse distance with a stack of
/// LIR/HIR entries and a small queue of HIR residents, retaining bounded
/// non-resident history for fast re-admission.
pub mod lirs;

/// Cache metrics system.
///
/// Provides a metrics collection and reporting system for all cache
/// algorithms. Each algorithm tracks algorithm-specific counters while
/// implementing a common interface.
pub mod metrics;

// Re-export cache types
pub use lfu::LfuCache;
pub use lirs::LirsCache;
pub use lru::LruCache;
pub use slru::SlruCache;

// Re-export the error type
pub use error::CacheError;
