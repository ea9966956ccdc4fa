//! Least Recently Used (LRU) Cache Implementation
//!
//! An LRU cache evicts the least recently accessed item when capacity is
//! reached. This implementation provides O(1) time complexity for all
//! operations using a hash map combined with a doubly-linked list.
//!
//! # How the Algorithm Works
//!
//! The cache maintains items ordered by their last access time: most recent
//! at the head, least recent at the tail.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      LRU Cache                          │
//! │                                                         │
//! │  HashMap<K, *Node>        Doubly-Linked List            │
//! │  ┌──────────────┐         ┌───────────────────────┐     │
//! │  │ "apple" ────────────▶  │ MRU ◀──▶ ... ◀──▶ LRU │     │
//! │  │ "banana" ───────────▶  │                       │     │
//! │  └──────────────┘         └───────────────────────┘     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation | Action | Time |
//! |-----------|--------|------|
//! | `get` | Move accessed node to the MRU position | O(1) |
//! | `set` | Update in place, or insert at head and evict the tail | O(1) |
//! | `del` | Unlink node from list, remove from map | O(1) |
//!
//! ## Eviction Example
//!
//! ```text
//! Cache capacity: 3
//!
//! set("a", 1)  →  [a]
//! set("b", 2)  →  [b, a]
//! set("c", 3)  →  [c, b, a]
//! get("a")     →  [a, c, b]       // "a" moved to front (MRU)
//! set("d", 4)  →  [d, a, c]       // "b" evicted (was LRU)
//! ```
//!
//! The same recency core ([`LruCore`]) backs the segmented policy in
//! [`crate::slru`], which moves whole nodes between two cores without
//! invalidating the handles its key maps hold.
//!
//! # Thread Safety
//!
//! `LruCache` is **not** thread-safe; `get` reorders the internal list, so
//! even read paths mutate. Wrap the cache in a `Mutex` or `RwLock` for
//! concurrent use.
//!
//! # Examples
//!
//! ```
//! use policy_cache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//!
//! cache.set("apple", 1);
//! cache.set("banana", 2);
//! assert_eq!(cache.get(&"apple"), Some(1));  // "apple" is now MRU
//!
//! cache.set("cherry", 3);  // evicts "banana" (LRU)
//! assert_eq!(cache.get(&"banana"), None);
//! ```

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::CacheError;
use crate::list::{Entry, List};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
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

/// Recency core shared by the plain LRU policy and the SLRU segments.
///
/// Couples one recency-ordered list of `(key, value)` nodes with a key map
/// pointing at those nodes. All operations are O(1). Capacity belongs to the
/// core, not the list: `add` prepends first and evicts the tail when the map
/// has grown past `capacity`.
///
/// # Safety
///
/// The `map` field stores raw pointers into `list`. These pointers are valid
/// as long as:
/// - the pointer was obtained from this core's `list` (or transferred in via
///   `move_item`, which re-homes the map entry along with the node);
/// - the node has not been removed from the list;
/// - the core has not been dropped.
pub(crate) struct LruCore<K, V, S = DefaultHashBuilder> {
    capacity: NonZeroUsize,
    list: List<(K, V)>,
    map: HashMap<K, *mut Entry<(K, V)>, S>,
}

// SAFETY: LruCore owns all of its nodes and the raw pointers in `map` never
// escape to other instances except through `move_item`, which transfers
// ownership wholesale. Mutation requires &mut self.
unsafe impl<K: Send, V: Send, S: Send> Send for LruCore<K, V, S> {}

// SAFETY: shared references expose no interior mutability.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LruCore<K, V, S> {}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCore<K, V, S> {
    pub(crate) fn with_hasher(capacity: NonZeroUsize, hash_builder: S) -> Result<Self, CacheError> {
        let mut map = HashMap::with_hasher(hash_builder);
        map.try_reserve(capacity.get())
            .map_err(|_| CacheError::AllocationFailure)?;

        Ok(LruCore {
            capacity,
            list: List::new(),
            map,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if the core currently holds more entries than its
    /// capacity. `add` and `move_item` may leave the core in this state
    /// momentarily; callers restore the bound before returning.
    #[inline]
    pub(crate) fn exceeds_capacity(&self) -> bool {
        self.map.len() > self.capacity.get()
    }

    /// Looks up the node for `key` without touching the recency order.
    #[inline]
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<*mut Entry<(K, V)>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    /// Returns a copy of the value for `key`, promoting its node to the MRU
    /// position.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        let node = self.map.get(key).copied()?;
        unsafe {
            // SAFETY: node comes from our map
            self.list.move_to_front(node);
            Some((*node).get_value().1.clone())
        }
    }

    /// Prepends a new entry, evicting the LRU entry when the core has grown
    /// past capacity. The caller must have verified that `key` is absent.
    ///
    /// Returns the evicted `(key, value)` pair, if any.
    pub(crate) fn add(&mut self, key: K, value: V) -> Option<(K, V)> {
        let node = self.list.add_front((key.clone(), value));
        self.map.insert(key, node);

        if self.exceeds_capacity() {
            self.evict_lru()
        } else {
            None
        }
    }

    /// Removes and returns the LRU entry.
    pub(crate) fn evict_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.remove_last()?;
        // SAFETY: entry came out of our list, so it holds an initialized pair
        let (key, value) = unsafe { entry.into_value() };
        self.map.remove(&key);
        Some((key, value))
    }

    /// Overwrites the value at `node` and promotes it to the MRU position.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from this core's map.
    pub(crate) unsafe fn update(&mut self, node: *mut Entry<(K, V)>, value: V) {
        (*node).get_value_mut().1 = value;
        self.list.move_to_front(node);
    }

    /// Removes `key` if present; returns whether anything was removed.
    pub(crate) fn del<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.remove(key) {
            Some(node) => {
                // SAFETY: node comes from our map and was removed exactly once
                unsafe {
                    let _ = self.list.remove(node);
                }
                true
            }
            None => false,
        }
    }

    /// Node at the MRU position, or null if the core is empty.
    #[inline]
    pub(crate) fn mru_item(&self) -> *mut Entry<(K, V)> {
        self.list.front_node()
    }

    /// Node at the LRU position, or null if the core is empty.
    #[inline]
    pub(crate) fn lru_item(&self) -> *mut Entry<(K, V)> {
        self.list.back_node()
    }

    /// Transfers `node` to the MRU position of `dest`, preserving the node
    /// address so existing handles stay valid.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from this core's map, and
    /// `dest` must be a different core.
    pub(crate) unsafe fn move_item(&mut self, node: *mut Entry<(K, V)>, dest: &mut Self) {
        let key = (*node).get_value().0.clone();
        self.map.remove(&key);

        let detached = self
            .list
            .remove(node)
            .expect("node is a live member of this core's list");
        let raw = Box::into_raw(detached);

        dest.list.attach_from_other_list(raw);
        dest.map.insert(key, raw);
    }

    /// Transfers the LRU entry of this core to the MRU position of `dest`.
    pub(crate) fn move_lru_item(&mut self, dest: &mut Self) {
        let node = self.lru_item();
        if node.is_null() {
            return;
        }
        // SAFETY: lru_item returned a live node of this core
        unsafe {
            self.move_item(node, dest);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

impl<K, V, S> core::fmt::Debug for LruCore<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruCore")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// A Least Recently Used (LRU) cache with O(1) operations.
///
/// Maintains items in order of access recency. When capacity is reached,
/// the least recently accessed item is evicted to make room for new entries.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone` (the key is stored in
///   both the list node and the index map).
/// - `V`: Value type. Must implement `Clone`; `get` copies the value out.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```
/// use policy_cache::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
///
/// cache.set("apple", 1);
/// cache.set("banana", 2);
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// // "banana" is now LRU, so it gets evicted
/// cache.set("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    core: LruCore<K, V, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero and
    /// [`CacheError::AllocationFailure`] when the key map cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        Self::init(LruCacheConfig { capacity })
    }

    /// Creates a new LRU cache from a configuration struct.
    pub fn init(config: LruCacheConfig) -> Result<Self, CacheError> {
        Self::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with a custom hash builder.
    ///
    /// Use this when you need a specific hasher (e.g. for deterministic
    /// hashing or DoS resistance).
    pub fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Result<Self, CacheError> {
        let capacity = config.capacity()?;
        Ok(Self {
            core: LruCore::with_hasher(capacity, hash_builder)?,
            metrics: LruCacheMetrics::new(),
        })
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.core.capacity()
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// If the key already exists its value is replaced and the entry moves to
    /// the MRU position. Otherwise the entry is inserted at the MRU position,
    /// evicting the LRU entry when the cache is at capacity.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(node) = self.core.find(&key) {
            // SAFETY: node comes from the core's own map
            unsafe {
                self.core.update(node, value);
            }
        } else if self.core.add(key, value).is_some() {
            self.metrics.core.record_eviction();
        }
        self.metrics.core.record_insertion();
    }

    /// Returns a copy of the value for `key`, marking the entry as most
    /// recently used. Returns `None` if the key is not present.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.core.get(key) {
            Some(value) => {
                self.metrics.core.record_hit();
                Some(value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Removes `key` from the cache; returns whether anything was removed.
    /// Absent keys are a silent no-op.
    pub fn del<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.core.del(key)
    }

    /// Removes all entries from the cache.
    pub fn clear(&mut self) {
        self.core.clear();
    }
}

impl<K: Hash + Eq, V, S> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}
