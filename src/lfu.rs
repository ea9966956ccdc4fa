//! Least Frequently Used Cache Implementation.
//!
//! The LFU (Least Frequently Used) cache evicts the least frequently accessed
//! item when the cache reaches capacity; among items with the same access
//! count, the least recently inserted/promoted one goes first.
//!
//! # How the Algorithm Works
//!
//! This is the constant-time LFU construction: a doubly-linked list of
//! frequency buckets in strictly increasing frequency order, where each
//! bucket owns a list of the items sharing that exact access count.
//!
//! ```text
//! buckets:   [freq 1]──▶[freq 3]──▶[freq 7]
//!              │           │          │
//!            items:      items:     items:
//!            d, e        a          b, c        (front = oldest)
//! ```
//!
//! Every item carries a back-pointer to its bucket node, and the key map
//! points straight at the item node, so `get`, `set` and `del` never scan:
//!
//! - a hit splices the item to the back of the `frequency + 1` bucket,
//!   creating that bucket in place if the successor's frequency differs;
//! - eviction pops the front (oldest) item of the first (lowest) bucket;
//! - buckets are removed the moment they become empty, which keeps the
//!   bucket frequencies strictly increasing front to back.
//!
//! When an item's count reaches `usize::MAX` the touch degrades to plain
//! LRU inside its bucket: the item moves to the bucket's back and the count
//! stays put, avoiding wrap-around.
//!
//! # Examples
//!
//! ```
//! use policy_cache::LfuCache;
//!
//! let mut cache = LfuCache::new(2).unwrap();
//!
//! cache.set("hot", 1);
//! cache.set("cold", 2);
//! cache.get(&"hot"); // frequency 2
//!
//! cache.set("new", 3); // evicts "cold" (lowest frequency, oldest)
//! assert_eq!(cache.get(&"cold"), None);
//! assert_eq!(cache.get(&"hot"), Some(1));
//! ```

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::error::CacheError;
use crate::list::{Entry, List};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A cached item plus the back-pointer to the bucket that owns it.
///
/// The bucket pointer is a handle, not ownership: buckets own their items,
/// items merely remember where they live so `touch` can splice them onward
/// without consulting the bucket list.
struct LfuItem<K, V> {
    key: K,
    value: V,
    bucket: *mut Entry<FreqBucket<K, V>>,
}

/// One frequency class: the exact access count and the items that share it,
/// LRU-ordered with the oldest at the front.
struct FreqBucket<K, V> {
    frequency: usize,
    items: List<LfuItem<K, V>>,
}

impl<K, V> FreqBucket<K, V> {
    fn new(frequency: usize) -> Self {
        FreqBucket {
            frequency,
            items: List::new(),
        }
    }
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// Tracks the access frequency of each item and evicts the least frequently
/// used one when capacity is reached; frequency ties break towards the
/// oldest item. All operations are O(1).
///
/// # Examples
///
/// ```
/// use policy_cache::LfuCache;
///
/// let mut cache = LfuCache::new(3).unwrap();
///
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.set("c", 3);
///
/// cache.get(&"a");
/// cache.get(&"a");
/// cache.get(&"b");
///
/// // "c" has the lowest frequency and is evicted.
/// cache.set("d", 4);
/// assert_eq!(cache.get(&"c"), None);
/// ```
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    capacity: NonZeroUsize,

    /// Frequency buckets in strictly increasing frequency order.
    buckets: List<FreqBucket<K, V>>,

    /// Map from keys to their item node. The item's bucket back-pointer
    /// completes the path to its frequency class.
    map: HashMap<K, *mut Entry<LfuItem<K, V>>, S>,

    metrics: LfuCacheMetrics,
}

// SAFETY: LfuCache owns the bucket list, which owns every item node; the raw
// pointers in `map` and in item back-pointers never leave this value. All
// mutation requires &mut self.
unsafe impl<K: Send, V: Send, S: Send> Send for LfuCache<K, V, S> {}

// SAFETY: shared references expose no interior mutability.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LfuCache<K, V, S> {}

impl<K: Hash + Eq + Clone, V: Clone> LfuCache<K, V> {
    /// Creates a new LFU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero and
    /// [`CacheError::AllocationFailure`] when the key map cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        Self::init(LfuCacheConfig { capacity })
    }

    /// Creates a new LFU cache from a configuration struct.
    pub fn init(config: LfuCacheConfig) -> Result<Self, CacheError> {
        Self::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates a new LFU cache with a custom hash builder.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Result<Self, CacheError> {
        let capacity = config.capacity()?;

        let mut map = HashMap::with_hasher(hash_builder);
        map.try_reserve(capacity.get())
            .map_err(|_| CacheError::AllocationFailure)?;

        Ok(LfuCache {
            capacity,
            buckets: List::new(),
            map,
            metrics: LfuCacheMetrics::new(),
        })
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Moves `item_node` into the bucket for its next frequency.
    ///
    /// Reuses the successor bucket when it carries exactly `frequency + 1`,
    /// otherwise splices a fresh bucket right after the current one. The
    /// emptied source bucket is removed. At `usize::MAX` the item only moves
    /// to the back of its current bucket.
    ///
    /// # Safety
    ///
    /// `item_node` must be a valid pointer obtained from this cache's map.
    unsafe fn touch(&mut self, item_node: *mut Entry<LfuItem<K, V>>) {
        let bucket_node = (*item_node).get_value().bucket;
        let frequency = (*bucket_node).get_value().frequency;

        if frequency == usize::MAX {
            // Saturated: LRU within the bucket, count unchanged.
            (*bucket_node).get_value_mut().items.move_to_back(item_node);
            self.metrics.record_frequency_increment(frequency);
            return;
        }

        let target_frequency = frequency + 1;
        let next = self.buckets.next_node(bucket_node);

        let dest = if !next.is_null() && (*next).get_value().frequency == target_frequency {
            next
        } else {
            self.buckets
                .insert_after(bucket_node, FreqBucket::new(target_frequency))
        };

        let detached = (*bucket_node)
            .get_value_mut()
            .items
            .remove(item_node)
            .expect("item is a live member of its bucket");
        (*dest)
            .get_value_mut()
            .items
            .attach_last_from_other_list(Box::into_raw(detached));
        (*item_node).get_value_mut().bucket = dest;

        if (*bucket_node).get_value().items.is_empty() {
            let _ = self.buckets.remove(bucket_node);
        }

        self.metrics.record_frequency_increment(target_frequency);
    }

    /// Removes the eviction candidate: the oldest item of the lowest
    /// frequency bucket.
    fn evict_lfu(&mut self) -> Option<(K, V)> {
        let bucket_node = self.buckets.front_node();
        if bucket_node.is_null() {
            return None;
        }

        unsafe {
            // SAFETY: bucket_node is the live front of the bucket list, and
            // no bucket is ever left empty, so remove_first succeeds.
            let entry = (*bucket_node)
                .get_value_mut()
                .items
                .remove_first()
                .expect("buckets are never empty");
            let item = entry.into_value();
            self.map.remove(&item.key);

            if (*bucket_node).get_value().items.is_empty() {
                let _ = self.buckets.remove(bucket_node);
            }

            Some((item.key, item.value))
        }
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// An existing key is touched (its frequency rises) and its value
    /// replaced. A new key is admitted with frequency 1 after evicting the
    /// LFU candidate if the cache is full.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(&item_node) = self.map.get(&key) {
            // SAFETY: item_node comes from our map; touch preserves its
            // address.
            unsafe {
                self.touch(item_node);
                (*item_node).get_value_mut().value = value;
            }
            self.metrics.core.record_insertion();
            return;
        }

        if self.map.len() == self.capacity.get() && self.evict_lfu().is_some() {
            self.metrics.core.record_eviction();
        }

        unsafe {
            // New items always join a frequency-1 bucket at the head;
            // create it when the head is missing or carries a higher count.
            let head = self.buckets.front_node();
            let target = if head.is_null() || (*head).get_value().frequency != 1 {
                self.buckets.add_front(FreqBucket::new(1))
            } else {
                head
            };

            let item_node = (*target).get_value_mut().items.add_back(LfuItem {
                key: key.clone(),
                value,
                bucket: target,
            });
            self.map.insert(key, item_node);
        }

        self.metrics.core.record_insertion();
    }

    /// Returns a copy of the value for `key`, increasing its frequency.
    /// Returns `None` if the key is not present.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(&item_node) = self.map.get(key) {
            self.metrics.core.record_hit();
            // SAFETY: item_node comes from our map; touch preserves its
            // address.
            unsafe {
                self.touch(item_node);
                Some((*item_node).get_value().value.clone())
            }
        } else {
            self.metrics.core.record_miss();
            None
        }
    }

    /// Removes `key` from the cache; returns whether anything was removed.
    /// Absent keys are a silent no-op.
    pub fn del<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(item_node) = self.map.remove(key) else {
            return false;
        };

        unsafe {
            // SAFETY: item_node comes from our map and was removed exactly
            // once; its bucket pointer identifies the owning bucket.
            let bucket_node = (*item_node).get_value().bucket;
            let _ = (*bucket_node).get_value_mut().items.remove(item_node);

            if (*bucket_node).get_value().items.is_empty() {
                let _ = self.buckets.remove(bucket_node);
            }
        }

        true
    }

    /// Removes all entries from the cache.
    pub fn clear(&mut self) {
        self.map.clear();
        self.buckets.clear();
    }

    /// Walks the bucket list and checks its structural invariants.
    /// Test-only; the walk is O(n).
    #[cfg(test)]
    fn check_invariants(&self) {
        let mut total = 0;
        let mut last_frequency: Option<usize> = None;
        let mut bucket_node = self.buckets.front_node();

        while !bucket_node.is_null() {
            unsafe {
                let bucket = (*bucket_node).get_value();
                if let Some(prev) = last_frequency {
                    assert!(
                        bucket.frequency > prev,
                        "bucket frequencies must strictly increase"
                    );
                }
                last_frequency = Some(bucket.frequency);
                assert!(!bucket.items.is_empty(), "no bucket may be empty");

                let mut item_node = bucket.items.front_node();
                while !item_node.is_null() {
                    let item = (*item_node).get_value();
                    assert_eq!(
                        item.bucket, bucket_node,
                        "item back-pointer must identify its bucket"
                    );
                    assert_eq!(self.map.get(&item.key).copied(), Some(item_node));
                    total += 1;
                    item_node = bucket.items.next_node(item_node);
                }

                bucket_node = self.buckets.next_node(bucket_node);
            }
        }

        assert_eq!(total, self.map.len(), "map and bucket lists must agree");
        assert!(total <= self.capacity.get(), "size bound violated");
    }
}

impl<K, V, S> core::fmt::Debug for LfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_basic_eviction() {
        let mut cache = LfuCache::new(3).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);
        cache.check_invariants();

        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");
        cache.check_invariants();

        // "c" is the only frequency-1 item and gets evicted.
        cache.set("d", 4);
        cache.check_invariants();

        assert_eq!(cache.get(&"c"), None);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"d"), Some(4));
    }

    #[test]
    fn test_lfu_tie_breaks_towards_oldest() {
        let mut cache = LfuCache::new(2).unwrap();

        cache.set(1, 1);
        cache.set(2, 2); // freq-1 bucket: [1, 2], 1 is oldest
        cache.get(&1); // 1 moves to the freq-2 bucket

        cache.set(3, 3); // evicts 2, the front of the freq-1 bucket
        cache.check_invariants();

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(3));
        assert_eq!(cache.get(&1), Some(1));
    }

    #[test]
    fn test_lfu_update_preserves_frequency() {
        let mut cache = LfuCache::new(2).unwrap();

        cache.set("a", 1);
        cache.get(&"a"); // frequency 2
        cache.set("a", 10); // frequency 3, value replaced
        assert_eq!(cache.get(&"a"), Some(10));

        cache.set("b", 2);
        cache.set("c", 3); // evicts "b": "a" is far ahead on frequency
        cache.check_invariants();

        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_lfu_bucket_reuse_and_splice() {
        let mut cache = LfuCache::new(3).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        // Drive "a" and "b" through the same frequency steps so they share
        // buckets, then push "a" ahead so a new bucket must be spliced.
        cache.get(&"a");
        cache.get(&"b");
        cache.check_invariants();

        cache.get(&"a");
        cache.get(&"a");
        cache.check_invariants();

        assert_eq!(cache.get(&"c"), Some(3));
        cache.check_invariants();
    }

    #[test]
    fn test_lfu_del() {
        let mut cache = LfuCache::new(3).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"a");

        assert!(cache.del(&"a"));
        assert!(!cache.del(&"a"));
        cache.check_invariants();

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lfu_del_drops_empty_bucket() {
        let mut cache = LfuCache::new(2).unwrap();

        cache.set("a", 1);
        cache.get(&"a"); // sole occupant of the freq-2 bucket
        cache.set("b", 2);

        assert!(cache.del(&"a"));
        cache.check_invariants();

        // The freq-2 bucket is gone; new inserts land in freq 1 again.
        cache.set("c", 3);
        cache.check_invariants();
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_lfu_clear() {
        let mut cache = LfuCache::new(3).unwrap();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.get(&"a");

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);

        cache.set("c", 3);
        cache.check_invariants();
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_lfu_invalid_capacity() {
        assert!(LfuCache::<&str, i32>::new(0).is_err());
    }

    #[test]
    fn test_lfu_size_bound_under_churn() {
        let mut cache = LfuCache::new(4).unwrap();
        for i in 0..200usize {
            cache.set(i % 13, i);
            if i % 2 == 0 {
                cache.get(&(i % 7));
            }
            cache.check_invariants();
            assert!(cache.len() <= 4);
        }
    }

    #[test]
    fn test_lfu_metrics() {
        let mut cache = LfuCache::new(2).unwrap();
        cache.set("a", 1);
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"x");

        let report = cache.metrics();
        assert_eq!(report.get("cache_hits"), Some(&2.0));
        assert_eq!(report.get("cache_misses"), Some(&1.0));
        assert_eq!(report.get("frequency_increments"), Some(&2.0));
        assert_eq!(report.get("max_frequency"), Some(&3.0));
        assert_eq!(cache.algorithm_name(), "LFU");
    }
}
