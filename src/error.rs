//! Error types for cache construction.
//!
//! There are exactly two failure classes: a constructor can reject its
//! parameters, or the key-map pre-reservation can fail to allocate. Lookup
//! misses are not errors; they are the `None` arm of [`get`] results.
//!
//! [`get`]: crate::LruCache::get

use core::fmt;

/// Error returned by fallible cache constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// A constructor parameter is out of range: zero capacity, a ratio
    /// outside its valid interval, or a ratio whose derived segment/budget
    /// sizes floor to zero.
    InvalidArgument(&'static str),

    /// The allocator could not reserve storage for the key map.
    /// The cache is not constructed; nothing is leaked.
    AllocationFailure,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            CacheError::AllocationFailure => f.write_str("failed to allocate cache storage"),
        }
    }
}

impl core::error::Error for CacheError {}
