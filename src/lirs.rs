//! Low Inter-reference Recency Set (LIRS) Cache Implementation.
//!
//! LIRS classifies blocks by their reuse distance instead of raw recency:
//! blocks with a low inter-reference recency (LIR) keep their values in
//! **stack S**, while high inter-reference recency (HIR) blocks keep their
//! values in a small LRU **list Q**. The stack additionally remembers
//! recently evicted HIR keys as non-resident shadows, so a key that comes
//! back quickly can be recognised as hot and promoted straight into the LIR
//! set. This is what lets LIRS survive scans and loops that defeat LRU.
//!
//! # Structures
//!
//! ```text
//! stack S (recency, all classes)        list Q (HIR residents)
//! ┌───────────────────────────┐         ┌──────────────┐
//! │ k1 LIR    value           │         │ k4  value    │
//! │ k4 HIR    ──────────────────────────▶ (twin node)  │
//! │ k9 HIR_NR (shadow)        │         │ k7  value    │
//! │ k2 LIR    value           │◀─ back  └──────────────┘
//! └───────────────────────────┘   is always LIR (pruning)
//! ```
//!
//! An entry is in exactly one of four states: LIR (value in S), HIR resident
//! with a twin in S (value in Q, S holds a cross-reference), HIR resident in
//! Q only, or HIR non-resident (shadow in S, no value). The budgets are
//! `lir_capacity` for the LIR set and `hir_capacity` for Q; their sum is the
//! cache capacity. Shadows are metadata and do not count against capacity.
//!
//! After every mutation the bottom of S is pruned until a LIR entry is at
//! the back; pruned resident twins leave Q with their shadow.
//!
//! # Examples
//!
//! ```
//! use policy_cache::LirsCache;
//!
//! // Capacity 3: LIR budget 2, HIR budget 1.
//! let mut cache = LirsCache::new(3, 0.34).unwrap();
//!
//! cache.set("a", 1); // warm-up: straight into the LIR set
//! cache.set("b", 2);
//! cache.set("c", 3); // LIR set full: admitted as HIR resident
//! assert_eq!(cache.get(&"a"), Some(1));
//! ```

extern crate alloc;

use crate::config::LirsCacheConfig;
use crate::error::CacheError;
use crate::list::{Entry, List};
use crate::metrics::{CacheMetrics, LirsCacheMetrics};
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

/// Classification of an entry in stack S.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LirsKind {
    /// Low inter-reference recency: the value lives in stack S.
    Lir,
    /// High inter-reference recency, resident: the value lives in list Q.
    /// In stack S this kind carries a cross-reference to the Q node.
    Hir,
    /// High inter-reference recency, non-resident: shadow without a value.
    HirNr,
}

/// What an entry carries, depending on where its value lives.
enum LirsPayload<K, V> {
    /// The value itself (LIR entries in S, HIR entries in Q).
    Value(V),
    /// Cross-reference from an S twin to the Q node holding the value.
    QNode(*mut Entry<LirsItem<K, V>>),
    /// Nothing: non-resident shadows.
    Empty,
}

/// One entry of stack S or list Q.
struct LirsItem<K, V> {
    key: K,
    kind: LirsKind,
    payload: LirsPayload<K, V>,
}

impl<K, V> LirsItem<K, V> {
    /// The value of a resident entry.
    fn value(&self) -> &V {
        match &self.payload {
            LirsPayload::Value(v) => v,
            _ => unreachable!("resident entry must carry a value"),
        }
    }

    /// The Q node referenced by an HIR twin in S.
    fn q_node(&self) -> *mut Entry<LirsItem<K, V>> {
        match self.payload {
            LirsPayload::QNode(node) => node,
            _ => unreachable!("HIR twin must reference its queue node"),
        }
    }
}

/// An LRU-ordered list with a key index, used for both stack S and list Q.
///
/// `capacity` is a policy budget, not a hard bound on the list: stack S
/// holds shadows and twins beyond its LIR budget, and only list Q treats
/// `is_full` as an admission gate.
struct LirsQueue<K, V, S = DefaultHashBuilder> {
    capacity: usize,
    list: List<LirsItem<K, V>>,
    map: HashMap<K, *mut Entry<LirsItem<K, V>>, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LirsQueue<K, V, S> {
    fn with_hasher(capacity: NonZeroUsize, hash_builder: S) -> Result<Self, CacheError> {
        let mut map = HashMap::with_hasher(hash_builder);
        map.try_reserve(capacity.get())
            .map_err(|_| CacheError::AllocationFailure)?;

        Ok(LirsQueue {
            capacity: capacity.get(),
            list: List::new(),
            map,
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.list.len()
    }

    /// Only meaningful for list Q, the HIR residency gate.
    #[inline]
    fn is_full(&self) -> bool {
        self.list.len() >= self.capacity
    }

    #[inline]
    fn back_node(&self) -> *mut Entry<LirsItem<K, V>> {
        self.list.back_node()
    }

    #[inline]
    fn find<Q>(&self, key: &Q) -> Option<*mut Entry<LirsItem<K, V>>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    /// Adds an item at the MRU end and indexes it.
    fn add_front(&mut self, item: LirsItem<K, V>) -> *mut Entry<LirsItem<K, V>> {
        let key = item.key.clone();
        let node = self.list.add_front(item);
        self.map.insert(key, node);
        node
    }

    /// Moves a node to the MRU end.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from this queue's map.
    unsafe fn touch(&mut self, node: *mut Entry<LirsItem<K, V>>) {
        self.list.move_to_front(node);
    }

    /// Transfers `node` to the MRU end of `dest`, preserving its address.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from this queue's map, and
    /// `dest` must be a different queue.
    unsafe fn move_item(&mut self, node: *mut Entry<LirsItem<K, V>>, dest: &mut Self) {
        let key = (*node).get_value().key.clone();
        self.map.remove(&key);

        let detached = self
            .list
            .remove(node)
            .expect("node is a live member of this queue's list");
        dest.list.attach_from_other_list(Box::into_raw(detached));
        dest.map.insert(key, node);
    }

    /// Removes and drops `node`.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from this queue's map.
    unsafe fn remove_node(&mut self, node: *mut Entry<LirsItem<K, V>>) {
        self.map.remove(&(*node).get_value().key);
        let _ = self.list.remove(node);
    }

    fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }
}

/// An implementation of a LIRS (Low Inter-reference Recency Set) cache.
///
/// Based on the LIRS replacement algorithm by Jiang and Zhang. The cache
/// tracks reuse distance with stack S and keeps a small LRU list Q of
/// HIR-resident blocks; blocks re-referenced while still on the stack are
/// promoted into the LIR set, displacing the stalest LIR block into Q.
///
/// `get` on a non-resident shadow is a miss: the shadow only records
/// history, a fresh `set` is required to materialise a value.
///
/// # Examples
///
/// ```
/// use policy_cache::LirsCache;
///
/// let mut cache = LirsCache::new(3, 0.34).unwrap();
///
/// cache.set("a", 1);
/// cache.set("b", 2);
/// assert_eq!(cache.get(&"a"), Some(1));
/// assert_eq!(cache.get(&"missing"), None);
/// ```
pub struct LirsCache<K, V, S = DefaultHashBuilder> {
    /// Total resident capacity (LIR budget + HIR budget).
    capacity: NonZeroUsize,

    /// Stack S: recency order across all three classes. Its budget is the
    /// LIR capacity.
    stack_s: LirsQueue<K, V, S>,

    /// List Q: LRU queue of HIR-resident values. Its budget is the HIR
    /// capacity.
    list_q: LirsQueue<K, V, S>,

    /// Live tally of LIR entries in stack S.
    lirs_count: usize,

    metrics: LirsCacheMetrics,
}

// SAFETY: LirsCache owns both queues; every raw pointer (map entries and
// HIR cross-references) targets nodes owned by those queues and never
// escapes. Mutation requires &mut self.
unsafe impl<K: Send, V: Send, S: Send> Send for LirsCache<K, V, S> {}

// SAFETY: shared references expose no interior mutability.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LirsCache<K, V, S> {}

impl<K: Hash + Eq + Clone, V: Clone> LirsCache<K, V> {
    /// Creates a new LIRS cache.
    ///
    /// `hirs_ratio` is the fraction of `capacity` granted to HIR-resident
    /// blocks (list Q); the rest forms the LIR budget.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero, the
    /// ratio lies outside `(0, 1)`, or either derived budget is zero.
    pub fn new(capacity: usize, hirs_ratio: f64) -> Result<Self, CacheError> {
        Self::init(LirsCacheConfig {
            capacity,
            hirs_ratio,
        })
    }

    /// Creates a new LIRS cache from a configuration struct.
    pub fn init(config: LirsCacheConfig) -> Result<Self, CacheError> {
        Self::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher + Clone> LirsCache<K, V, S> {
    /// Creates a new LIRS cache with a custom hash builder.
    ///
    /// The hash builder is cloned, one instance per queue map.
    pub fn with_hasher(config: LirsCacheConfig, hash_builder: S) -> Result<Self, CacheError> {
        let (lir_cap, hir_cap) = config.budgets()?;

        let capacity = lir_cap
            .checked_add(hir_cap.get())
            .ok_or(CacheError::InvalidArgument("capacity overflow"))?;

        Ok(LirsCache {
            capacity,
            stack_s: LirsQueue::with_hasher(lir_cap, hash_builder.clone())?,
            list_q: LirsQueue::with_hasher(hir_cap, hash_builder)?,
            lirs_count: 0,
            metrics: LirsCacheMetrics::new(),
        })
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> LirsCache<K, V, S> {
    /// Returns the total number of resident entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the LIR budget (capacity of the LIR set in stack S).
    #[inline]
    pub fn lir_cap(&self) -> usize {
        self.stack_s.capacity
    }

    /// Returns the HIR budget (capacity of list Q).
    #[inline]
    pub fn hir_cap(&self) -> usize {
        self.list_q.capacity
    }

    /// Returns the current number of resident entries. Non-resident shadows
    /// in stack S are metadata and not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.lirs_count + self.list_q.len()
    }

    /// Returns `true` if the cache holds no resident entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the value for `key`, updating the LIRS state.
    ///
    /// A LIR hit refreshes the stack. A hit on an HIR block still on the
    /// stack promotes it to LIR (demoting the stalest LIR block). A hit on
    /// a Q-only block re-enters it into the stack as HIR. A non-resident
    /// shadow is a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(node) = self.stack_s.find(key) {
            // SAFETY: node comes from the stack map; promotion and pruning
            // below never invalidate a LIR node we read from afterwards.
            let kind = unsafe { (*node).get_value().kind };
            return match kind {
                LirsKind::Lir => unsafe {
                    self.stack_s.touch(node);
                    self.prune_stack_s();
                    self.metrics.core.record_hit();
                    Some((*node).get_value().value().clone())
                },
                LirsKind::Hir => unsafe {
                    let promoted = self.promote_hir_to_lir(node);
                    if self.lirs_count > self.stack_s.capacity {
                        // The promotion vacated a Q slot, so the demotion
                        // cannot overflow Q.
                        self.demote_lru_lir();
                    }
                    self.prune_stack_s();
                    self.metrics.core.record_hit();
                    Some((*promoted).get_value().value().clone())
                },
                LirsKind::HirNr => {
                    // The shadow records history only; the value is gone.
                    self.metrics.core.record_miss();
                    None
                }
            };
        }

        if let Some(qnode) = self.list_q.find(key) {
            // Resident HIR block whose stack entry has been pruned: re-enter
            // the stack as a twin and refresh Q.
            // SAFETY: qnode comes from the queue map and stays valid across
            // the touch.
            unsafe {
                let key_owned = (*qnode).get_value().key.clone();
                self.stack_s.add_front(LirsItem {
                    key: key_owned,
                    kind: LirsKind::Hir,
                    payload: LirsPayload::QNode(qnode),
                });
                self.list_q.touch(qnode);
                self.metrics.core.record_hit();
                return Some((*qnode).get_value().value().clone());
            }
        }

        self.metrics.core.record_miss();
        None
    }

    /// Inserts a key-value pair into the cache.
    ///
    /// A resident hit behaves like `get` with a value replacement (including
    /// HIR-to-LIR promotion). A hit on a non-resident shadow resurrects the
    /// key directly into the LIR set. Unknown keys enter the LIR set while
    /// it is still filling and list Q afterwards.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(node) = self.stack_s.find(&key) {
            // SAFETY: node comes from the stack map
            unsafe {
                self.update_in_stack_s(node, value);
            }
        } else if let Some(qnode) = self.list_q.find(&key) {
            // SAFETY: qnode comes from the queue map and stays valid across
            // the touch.
            unsafe {
                (*qnode).get_value_mut().payload = LirsPayload::Value(value);
                self.stack_s.add_front(LirsItem {
                    key,
                    kind: LirsKind::Hir,
                    payload: LirsPayload::QNode(qnode),
                });
                self.list_q.touch(qnode);
            }
        } else {
            self.insert(key, value);
        }

        self.metrics.core.record_insertion();
    }

    /// Removes `key` from the cache; returns whether anything was removed
    /// (shadows included). Absent keys are a silent no-op.
    pub fn del<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(node) = self.stack_s.find(key) {
            // SAFETY: node comes from the stack map; each branch removes it
            // exactly once.
            unsafe {
                match (*node).get_value().kind {
                    LirsKind::Lir => {
                        self.stack_s.remove_node(node);
                        self.lirs_count -= 1;
                    }
                    LirsKind::Hir => {
                        let qnode = (*node).get_value().q_node();
                        self.list_q.remove_node(qnode);
                        self.stack_s.remove_node(node);
                    }
                    LirsKind::HirNr => {
                        self.stack_s.remove_node(node);
                    }
                }
            }
            // The removal may have exposed a non-LIR stack bottom.
            self.prune_stack_s();
            return true;
        }

        if let Some(qnode) = self.list_q.find(key) {
            // SAFETY: qnode comes from the queue map; no stack twin exists
            // on this path.
            unsafe {
                self.list_q.remove_node(qnode);
            }
            return true;
        }

        false
    }

    /// Removes all entries, resident and shadow, from the cache.
    pub fn clear(&mut self) {
        self.stack_s.clear();
        self.list_q.clear();
        self.lirs_count = 0;
    }

    /// Applies a `set` hit on a stack entry.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer obtained from the stack map.
    unsafe fn update_in_stack_s(&mut self, node: *mut Entry<LirsItem<K, V>>, value: V) {
        match (*node).get_value().kind {
            LirsKind::Lir => {
                (*node).get_value_mut().payload = LirsPayload::Value(value);
                self.stack_s.touch(node);
            }
            LirsKind::Hir => {
                let promoted = self.promote_hir_to_lir(node);
                (*promoted).get_value_mut().payload = LirsPayload::Value(value);
                if self.lirs_count > self.stack_s.capacity {
                    self.demote_lru_lir();
                }
            }
            LirsKind::HirNr => {
                // Resurrection: the shadow becomes LIR in place.
                {
                    let item = (*node).get_value_mut();
                    item.kind = LirsKind::Lir;
                    item.payload = LirsPayload::Value(value);
                }
                self.stack_s.touch(node);
                self.lirs_count += 1;
                self.metrics.record_promotion();

                if self.lirs_count > self.stack_s.capacity {
                    if self.list_q.is_full() {
                        self.evict_lru_hir();
                    }
                    self.demote_lru_lir();
                }
            }
        }

        self.prune_stack_s();
    }

    /// Admits a key unknown to both structures.
    fn insert(&mut self, key: K, value: V) {
        // Warm-up prefers stack S while the LIR set is still filling. This
        // also covers the delete-induced state where S has LIR room while Q
        // is empty.
        if self.lirs_count < self.stack_s.capacity {
            self.stack_s.add_front(LirsItem {
                key,
                kind: LirsKind::Lir,
                payload: LirsPayload::Value(value),
            });
            self.lirs_count += 1;
            return;
        }

        if self.list_q.is_full() {
            self.evict_lru_hir();
        }

        let qnode = self.list_q.add_front(LirsItem {
            key: key.clone(),
            kind: LirsKind::Hir,
            payload: LirsPayload::Value(value),
        });
        self.stack_s.add_front(LirsItem {
            key,
            kind: LirsKind::Hir,
            payload: LirsPayload::QNode(qnode),
        });
    }

    /// Promotes an HIR twin in S to LIR: the twin is dropped and the Q node,
    /// value and all, is spliced to the top of the stack. Returns the
    /// promoted node.
    ///
    /// # Safety
    ///
    /// `node` must be a valid HIR-kind pointer obtained from the stack map.
    unsafe fn promote_hir_to_lir(
        &mut self,
        node: *mut Entry<LirsItem<K, V>>,
    ) -> *mut Entry<LirsItem<K, V>> {
        let qnode = (*node).get_value().q_node();

        // Drop the twin first so the stack map can re-index the moved node.
        self.stack_s.remove_node(node);
        self.list_q.move_item(qnode, &mut self.stack_s);
        (*qnode).get_value_mut().kind = LirsKind::Lir;

        self.lirs_count += 1;
        self.metrics.record_promotion();
        qnode
    }

    /// Demotes the stalest LIR entry into list Q as a resident HIR block.
    fn demote_lru_lir(&mut self) {
        // After pruning, a non-empty stack bottoms out on a LIR entry.
        self.prune_stack_s();

        let back = self.stack_s.back_node();
        if back.is_null() {
            return;
        }

        // SAFETY: back is a live node of the stack list
        unsafe {
            self.stack_s.move_item(back, &mut self.list_q);
            (*back).get_value_mut().kind = LirsKind::Hir;
        }

        self.lirs_count -= 1;
        self.metrics.record_demotion();
    }

    /// Evicts the LRU entry of list Q. A stack twin, if present, stays
    /// behind as a non-resident shadow; this is the single place where Q
    /// handles held by stack twins are invalidated.
    fn evict_lru_hir(&mut self) {
        let lru = self.list_q.back_node();
        if lru.is_null() {
            return;
        }

        // SAFETY: lru is a live node of the queue list
        unsafe {
            if let Some(twin) = self.stack_s.find(&(*lru).get_value().key) {
                let item = (*twin).get_value_mut();
                item.kind = LirsKind::HirNr;
                item.payload = LirsPayload::Empty;
                self.metrics.record_shadow_conversion();
            }
            self.list_q.remove_node(lru);
        }

        self.metrics.core.record_eviction();
    }

    /// Pops non-LIR entries off the bottom of stack S until a LIR entry (or
    /// nothing) remains. Popped resident twins take their Q node with them;
    /// popped shadows just disappear.
    fn prune_stack_s(&mut self) {
        loop {
            let back = self.stack_s.back_node();
            if back.is_null() {
                return;
            }

            // SAFETY: back is a live node of the stack list
            unsafe {
                match (*back).get_value().kind {
                    LirsKind::Lir => return,
                    LirsKind::Hir => {
                        let qnode = (*back).get_value().q_node();
                        self.list_q.remove_node(qnode);
                        self.stack_s.remove_node(back);
                        self.metrics.core.record_eviction();
                    }
                    LirsKind::HirNr => {
                        self.stack_s.remove_node(back);
                        self.metrics.record_shadow_prune();
                    }
                }
            }
        }
    }

    /// Walks both structures and checks the LIRS invariants. Test-only.
    #[cfg(test)]
    fn check_invariants(&self) {
        let mut lir_seen = 0;
        let mut node = self.stack_s.list.front_node();
        let mut last_kind = None;

        while !node.is_null() {
            unsafe {
                let item = (*node).get_value();
                assert_eq!(self.stack_s.map.get(&item.key).copied(), Some(node));
                match item.kind {
                    LirsKind::Lir => {
                        lir_seen += 1;
                        assert!(matches!(item.payload, LirsPayload::Value(_)));
                    }
                    LirsKind::Hir => {
                        let qnode = item.q_node();
                        let twin = (*qnode).get_value();
                        assert!(twin.key == item.key, "twin must share the key");
                        assert_eq!(self.list_q.map.get(&item.key).copied(), Some(qnode));
                    }
                    LirsKind::HirNr => {
                        assert!(matches!(item.payload, LirsPayload::Empty));
                        assert!(
                            self.list_q.map.get(&item.key).is_none(),
                            "shadows are never resident"
                        );
                    }
                }
                last_kind = Some(item.kind);
                node = self.stack_s.list.next_node(node);
            }
        }

        if let Some(kind) = last_kind {
            assert_eq!(kind, LirsKind::Lir, "the stack bottom must be LIR");
        }

        assert_eq!(lir_seen, self.lirs_count, "LIR tally must match the stack");
        assert!(self.lirs_count <= self.stack_s.capacity);

        let mut qnode = self.list_q.list.front_node();
        while !qnode.is_null() {
            unsafe {
                let item = (*qnode).get_value();
                assert_eq!(item.kind, LirsKind::Hir);
                assert!(matches!(item.payload, LirsPayload::Value(_)));
                assert_eq!(self.list_q.map.get(&item.key).copied(), Some(qnode));
                qnode = self.list_q.list.next_node(qnode);
            }
        }

        assert!(self.list_q.len() <= self.list_q.capacity);
        assert!(self.len() <= self.capacity.get(), "size bound violated");
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: BuildHasher> core::fmt::Debug for LirsCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LirsCache")
            .field("capacity", &self.capacity)
            .field("lirs_count", &self.lirs_count)
            .field("resident", &self.len())
            .finish()
    }
}

impl<K: Hash + Eq, V, S> CacheMetrics for LirsCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}
