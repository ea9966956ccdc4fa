//! Segmented Least Recently Used Cache Implementation.
//!
//! The SLRU (Segmented LRU) cache divides the cache into two segments:
//! - Probation segment: where new entries are initially placed
//! - Protected segment: where entries hit a second time are promoted to
//!
//! A key only reaches the protected segment by being referenced while it sits
//! in probation (the "double-hit" rule); one-time scans wash through the
//! probation segment without displacing the protected working set, which is
//! what gives SLRU its scan resistance over plain LRU.
//!
//! Both segments are [`LruCore`]s; promotion and demotion move whole list
//! nodes between the two cores, so the handles stored in the key maps remain
//! valid across segment changes.
//!
//! # Examples
//!
//! ```
//! use policy_cache::SlruCache;
//!
//! // Capacity 10 split 20/80: probation holds 2, protected holds 8.
//! let mut cache = SlruCache::new(10, 0.2).unwrap();
//!
//! cache.set("a", 1);
//! assert_eq!(cache.get(&"a"), Some(1)); // promoted to protected
//! ```

extern crate alloc;

use crate::config::SlruCacheConfig;
use crate::error::CacheError;
use crate::list::Entry;
use crate::lru::LruCore;
use crate::metrics::{CacheMetrics, SlruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// An implementation of a Segmented Least Recently Used (SLRU) cache.
///
/// New entries are admitted into the probation segment; a hit on a probation
/// entry promotes it to the protected segment. When promotion overflows the
/// protected segment, its LRU entry is demoted back to the probation front.
/// Capacity-pressure evictions always take the probation LRU.
///
/// # Examples
///
/// ```
/// use policy_cache::SlruCache;
///
/// let mut cache = SlruCache::new(4, 0.5).unwrap();
///
/// cache.set("a", 1);
/// cache.set("b", 2);
///
/// // Promote "a" with a read; "b" stays in probation.
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// cache.set("c", 3);
/// cache.set("d", 4); // probation (cap 2) evicts "b"
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
#[derive(Debug)]
pub struct SlruCache<K, V, S = DefaultHashBuilder> {
    /// Total capacity (probation + protected).
    capacity: NonZeroUsize,

    /// The probation segment holding newer or once-referenced items.
    probation: LruCore<K, V, S>,

    /// The protected segment holding items referenced at least twice.
    protected: LruCore<K, V, S>,

    /// Metrics for tracking segment hits and promotion/demotion traffic.
    metrics: SlruCacheMetrics,
}

impl<K: Hash + Eq + Clone, V: Clone> SlruCache<K, V> {
    /// Creates a new SLRU cache.
    ///
    /// The probation segment receives `floor(capacity * probation_ratio)`
    /// entries and the protected segment the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero, the
    /// ratio lies outside `[0, 1]`, or either derived segment size is zero.
    pub fn new(capacity: usize, probation_ratio: f64) -> Result<Self, CacheError> {
        Self::init(SlruCacheConfig {
            capacity,
            probation_ratio,
        })
    }

    /// Creates a new SLRU cache from a configuration struct.
    pub fn init(config: SlruCacheConfig) -> Result<Self, CacheError> {
        Self::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher + Clone> SlruCache<K, V, S> {
    /// Creates a new SLRU cache with a custom hash builder.
    ///
    /// The hash builder is cloned, one instance per segment map.
    pub fn with_hasher(config: SlruCacheConfig, hash_builder: S) -> Result<Self, CacheError> {
        let (probation_cap, protected_cap) = config.segment_capacities()?;

        // Both segment sizes are non-zero, so their sum is too.
        let capacity = probation_cap
            .checked_add(protected_cap.get())
            .ok_or(CacheError::InvalidArgument("capacity overflow"))?;

        Ok(SlruCache {
            capacity,
            probation: LruCore::with_hasher(probation_cap, hash_builder.clone())?,
            protected: LruCore::with_hasher(protected_cap, hash_builder)?,
            metrics: SlruCacheMetrics::new(),
        })
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> SlruCache<K, V, S> {
    /// Returns the total number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the capacity of the probation segment.
    #[inline]
    pub fn probation_cap(&self) -> NonZeroUsize {
        self.probation.capacity()
    }

    /// Returns the capacity of the protected segment.
    #[inline]
    pub fn protected_cap(&self) -> NonZeroUsize {
        self.protected.capacity()
    }

    /// Returns the current number of entries across both segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.probation.len() + self.protected.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.probation.is_empty() && self.protected.is_empty()
    }

    /// Moves a probation node to the protected MRU position, demoting the
    /// protected LRU back into probation if the promotion overflowed it.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from the probation map.
    unsafe fn promote(&mut self, node: *mut Entry<(K, V)>) {
        self.probation.move_item(node, &mut self.protected);
        self.metrics.record_promotion();

        if self.protected.exceeds_capacity() {
            self.protected.move_lru_item(&mut self.probation);
            self.metrics.record_demotion();

            // The promotion freed a probation slot, so demotion normally
            // restores the bound exactly. Evict in case it did not.
            if self.probation.exceeds_capacity() && self.probation.evict_lru().is_some() {
                self.metrics.core.record_eviction();
            }
        }
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// A hit on a protected entry updates it in place; a hit on a probation
    /// entry counts as the double hit and promotes the entry while updating
    /// its value. New keys are admitted into the probation segment, evicting
    /// the probation LRU when that segment is full.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(node) = self.protected.find(&key) {
            // SAFETY: node comes from the protected core's map
            unsafe {
                self.protected.update(node, value);
            }
        } else if let Some(node) = self.probation.find(&key) {
            // SAFETY: node comes from the probation core's map; after the
            // promotion it sits at the protected MRU position.
            unsafe {
                self.promote(node);
                let mru = self.protected.mru_item();
                (*mru).get_value_mut().1 = value;
            }
        } else if self.probation.add(key, value).is_some() {
            self.metrics.core.record_eviction();
        }
        self.metrics.core.record_insertion();
    }

    /// Returns a copy of the value for `key`.
    ///
    /// A protected hit refreshes the entry's recency. A probation hit
    /// promotes the entry to the protected segment — promotion on read is
    /// mandatory, it is what distinguishes the policy. Returns `None` on
    /// miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(value) = self.protected.get(key) {
            self.metrics.record_protected_hit();
            return Some(value);
        }

        if let Some(node) = self.probation.find(key) {
            self.metrics.record_probation_hit();
            // SAFETY: node comes from the probation core's map; the promoted
            // entry is read back from the protected MRU position.
            unsafe {
                self.promote(node);
                return Some((*self.protected.mru_item()).get_value().1.clone());
            }
        }

        self.metrics.core.record_miss();
        None
    }

    /// Removes `key` from whichever segment holds it; returns whether
    /// anything was removed. Absent keys are a silent no-op.
    pub fn del<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        // A key lives in at most one segment.
        self.probation.del(key) || self.protected.del(key)
    }

    /// Removes all entries from both segments.
    pub fn clear(&mut self) {
        self.probation.clear();
        self.protected.clear();
    }
}

impl<K: Hash + Eq, V, S> CacheMetrics for SlruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}
