//! Correctness Tests for Cache Algorithms
//!
//! This module validates the fundamental correctness of each cache algorithm
//! using simple, predictable access patterns. Each test explicitly validates
//! which specific key gets evicted when a set causes an eviction.
//!
//! ## Test Strategy
//! - Small cache sizes (2-10 entries) for predictable behavior
//! - Simple, deterministic access patterns
//! - Each scenario checks the core eviction policy of the algorithm,
//!   including the oldest-first tie-breaks the policies guarantee

use policy_cache::{LfuCache, LirsCache, LruCache, SlruCache};

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

/// Helper to create an LruCache with the given capacity
fn make_lru<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LruCache<K, V> {
    LruCache::new(cap).expect("valid LRU capacity")
}

/// Helper to create an SlruCache with the given capacity and probation ratio
fn make_slru<K: std::hash::Hash + Eq + Clone, V: Clone>(
    cap: usize,
    probation_ratio: f64,
) -> SlruCache<K, V> {
    SlruCache::new(cap, probation_ratio).expect("valid SLRU config")
}

/// Helper to create an LfuCache with the given capacity
fn make_lfu<K: std::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LfuCache<K, V> {
    LfuCache::new(cap).expect("valid LFU capacity")
}

/// Helper to create a LirsCache with the given capacity and HIR ratio
fn make_lirs<K: std::hash::Hash + Eq + Clone, V: Clone>(
    cap: usize,
    hirs_ratio: f64,
) -> LirsCache<K, V> {
    LirsCache::new(cap, hirs_ratio).expect("valid LIRS config")
}

// ============================================================================
// END-TO-END EVICTION SCENARIOS
// ============================================================================

#[test]
fn test_lru_eviction_scenario() {
    let mut cache = make_lru(2);

    cache.set(1, 1);
    cache.set(2, 2);
    assert_eq!(cache.get(&1), Some(1));

    cache.set(3, 3); // evicts 2 (LRU)
    assert_eq!(cache.get(&2), None);

    cache.set(4, 4); // evicts 1 (get(1) then set(3) left 1 as LRU)
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&3), Some(3));
    assert_eq!(cache.get(&4), Some(4));
}

#[test]
fn test_slru_eviction_scenario() {
    // Capacity 10, probation ratio 0.2: probation 2, protected 8.
    let mut cache = make_slru(10, 0.2);

    cache.set(1, 1);
    cache.set(2, 2);
    cache.set(3, 3); // probation (cap 2) evicts 1
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(2)); // 2 promoted to protected

    cache.set(4, 4);
    assert_eq!(cache.get(&2), Some(2));
    assert_eq!(cache.get(&3), Some(3)); // 3 promoted

    for i in 5..=10 {
        cache.set(i, i);
        assert_eq!(cache.get(&i), Some(i)); // all promoted
    }

    cache.set(11, 11);
    cache.set(12, 12); // probation churn; 4 stays in probation until evicted
    assert_eq!(cache.get(&4), None);
    assert_eq!(cache.get(&11), Some(11));

    cache.set(13, 13);
    cache.set(14, 14);
    // 2 was demoted from protected into probation and eventually evicted.
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(3));
}

#[test]
fn test_lirs_eviction_scenario() {
    // Capacity 3, HIR ratio 0.34: LIR budget 2, HIR budget 1.
    let mut cache = make_lirs(3, 0.34);

    cache.set("B", 1); // S: B(LIR)
    cache.set("A", 1); // S: B(LIR), A(LIR)
    cache.set("D", 1); // S: B, A, D(HIR); Q: D

    cache.del("D"); // D's value is gone
    assert_eq!(cache.get(&"D"), None);

    cache.del("A");
    assert_eq!(cache.get(&"A"), None);

    cache.set("A", 1); // LIR set has room again: A re-enters as LIR
    cache.set("E", 1); // LIR set full: E is HIR resident; Q: E

    cache.set("D", 2); // E evicted from Q (shadowed), D takes the hot slot
    assert_eq!(cache.get(&"D"), Some(2));
    assert_eq!(cache.get(&"E"), None);
    assert_eq!(cache.get(&"A"), Some(1));
}

#[test]
fn test_lfu_eviction_scenario() {
    let mut cache = make_lfu(2);

    cache.set(1, 1);
    cache.set(2, 2); // buckets: [1: {1, 2}]
    assert_eq!(cache.get(&1), Some(1)); // buckets: [1: {2}, 2: {1}]

    cache.set(3, 3); // evicts 2, the lowest-frequency bucket's oldest item
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(3));
    assert_eq!(cache.get(&1), Some(1));
}

// ============================================================================
// ROUND-TRIP AND IDEMPOTENCE PROPERTIES
// ============================================================================

#[test]
fn test_set_get_round_trip() {
    let mut lru = make_lru(4);
    let mut slru = make_slru(4, 0.5);
    let mut lfu = make_lfu(4);
    let mut lirs = make_lirs(4, 0.3);

    lru.set("k", 7);
    slru.set("k", 7);
    lfu.set("k", 7);
    lirs.set("k", 7);

    assert_eq!(lru.get(&"k"), Some(7));
    assert_eq!(slru.get(&"k"), Some(7));
    assert_eq!(lfu.get(&"k"), Some(7));
    assert_eq!(lirs.get(&"k"), Some(7));
}

#[test]
fn test_set_del_get_misses() {
    let mut lru = make_lru(4);
    let mut slru = make_slru(4, 0.5);
    let mut lfu = make_lfu(4);
    let mut lirs = make_lirs(4, 0.3);

    lru.set("k", 7);
    slru.set("k", 7);
    lfu.set("k", 7);
    lirs.set("k", 7);

    assert!(lru.del(&"k"));
    assert!(slru.del(&"k"));
    assert!(lfu.del(&"k"));
    assert!(lirs.del(&"k"));

    assert_eq!(lru.get(&"k"), None);
    assert_eq!(slru.get(&"k"), None);
    assert_eq!(lfu.get(&"k"), None);
    assert_eq!(lirs.get(&"k"), None);
}

#[test]
fn test_del_absent_is_a_no_op() {
    // Deleting a missing key must not disturb the state observable through
    // subsequent gets of other keys.
    let mut cache = make_lru(2);
    cache.set("a", 1);
    cache.set("b", 2);

    assert!(!cache.del(&"missing"));

    // Recency order is unchanged: "a" is still the LRU victim.
    cache.set("c", 3);
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(2));
    assert_eq!(cache.get(&"c"), Some(3));

    let mut lfu = make_lfu(2);
    lfu.set("a", 1);
    assert!(!lfu.del(&"missing"));
    assert_eq!(lfu.get(&"a"), Some(1));
    assert_eq!(lfu.len(), 1);

    let mut lirs = make_lirs(3, 0.34);
    lirs.set("a", 1);
    assert!(!lirs.del(&"missing"));
    assert_eq!(lirs.get(&"a"), Some(1));
}

#[test]
fn test_update_replaces_value_everywhere() {
    let mut lru = make_lru(4);
    let mut slru = make_slru(4, 0.5);
    let mut lfu = make_lfu(4);
    let mut lirs = make_lirs(4, 0.3);

    for cache_set in 0..2 {
        let value = if cache_set == 0 { 1 } else { 99 };
        lru.set("k", value);
        slru.set("k", value);
        lfu.set("k", value);
        lirs.set("k", value);
    }

    assert_eq!(lru.get(&"k"), Some(99));
    assert_eq!(slru.get(&"k"), Some(99));
    assert_eq!(lfu.get(&"k"), Some(99));
    assert_eq!(lirs.get(&"k"), Some(99));
}

// ============================================================================
// SIZE BOUNDS UNDER CHURN
// ============================================================================

#[test]
fn test_size_bound_lru() {
    let mut cache = make_lru(8);
    for i in 0..1000usize {
        cache.set(i % 37, i);
        if i % 3 == 0 {
            cache.get(&(i % 19));
        }
        assert!(cache.len() <= 8);
    }
}

#[test]
fn test_size_bound_slru() {
    let mut cache = make_slru(8, 0.25);
    for i in 0..1000usize {
        cache.set(i % 37, i);
        if i % 3 == 0 {
            cache.get(&(i % 19));
        }
        if i % 41 == 0 {
            cache.del(&(i % 7));
        }
        assert!(cache.len() <= 8);
    }
}

#[test]
fn test_size_bound_lfu() {
    let mut cache = make_lfu(8);
    for i in 0..1000usize {
        cache.set(i % 37, i);
        if i % 3 == 0 {
            cache.get(&(i % 19));
        }
        if i % 41 == 0 {
            cache.del(&(i % 7));
        }
        assert!(cache.len() <= 8);
    }
}

#[test]
fn test_size_bound_lirs() {
    let mut cache = make_lirs(8, 0.25);
    for i in 0..1000usize {
        cache.set(i % 37, i);
        if i % 3 == 0 {
            cache.get(&(i % 19));
        }
        if i % 41 == 0 {
            cache.del(&(i % 7));
        }
        assert!(cache.len() <= 8, "resident count exceeded capacity");
    }
}

// ============================================================================
// CONSTRUCTION FAILURE MODES
// ============================================================================

#[test]
fn test_constructors_reject_bad_parameters() {
    assert!(LruCache::<i32, i32>::new(0).is_err());
    assert!(LfuCache::<i32, i32>::new(0).is_err());

    assert!(SlruCache::<i32, i32>::new(0, 0.2).is_err());
    assert!(SlruCache::<i32, i32>::new(10, -1.0).is_err());
    assert!(SlruCache::<i32, i32>::new(10, 2.0).is_err());
    assert!(SlruCache::<i32, i32>::new(10, 0.01).is_err()); // probation floors to 0
    assert!(SlruCache::<i32, i32>::new(1, 0.5).is_err()); // one entry, two segments

    assert!(LirsCache::<i32, i32>::new(0, 0.34).is_err());
    assert!(LirsCache::<i32, i32>::new(10, 0.0).is_err());
    assert!(LirsCache::<i32, i32>::new(10, 1.0).is_err());
    assert!(LirsCache::<i32, i32>::new(10, 0.01).is_err()); // HIR budget floors to 0
}

#[test]
fn test_constructors_accept_boundary_parameters() {
    // The smallest configurations that still yield two non-empty sides.
    let slru = SlruCache::<i32, i32>::new(2, 0.5).unwrap();
    assert_eq!(slru.probation_cap().get(), 1);
    assert_eq!(slru.protected_cap().get(), 1);

    let lirs = LirsCache::<i32, i32>::new(2, 0.5).unwrap();
    assert_eq!(lirs.lir_cap(), 1);
    assert_eq!(lirs.hir_cap(), 1);

    let lru = LruCache::<i32, i32>::new(1).unwrap();
    assert_eq!(lru.cap().get(), 1);
}

// ============================================================================
// CAPACITY-ONE EDGE CASES
// ============================================================================

#[test]
fn test_lru_capacity_one() {
    let mut cache = make_lru(1);
    cache.set("a", 1);
    cache.set("b", 2); // evicts "a"
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_lfu_capacity_one() {
    let mut cache = make_lfu(1);
    cache.set("a", 1);
    cache.get(&"a");
    cache.set("b", 2); // evicts "a" despite its higher count: it is alone
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(2));
}
