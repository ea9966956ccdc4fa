// Aliasing-discipline tests for the raw-pointer internals.
//
// Every cache here indexes intrusive list nodes through raw pointers; these
// tests hammer the paths where a node is read, spliced, and read again so
// that Miri's Stacked Borrows checker can catch any reference that outlives
// a structural mutation.
//
// Run with: cargo +nightly miri test --test test_miri_stacked_borrows

#![cfg(test)]

use policy_cache::{LfuCache, LirsCache, LruCache, SlruCache};

/// LRU: get/set interleavings move nodes to the front while the key map
/// keeps pointing at them.
#[test]
fn test_lru_aliasing_under_touch() {
    let mut cache = LruCache::new(10).unwrap();

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    for _ in 0..3 {
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    cache.set("a", 11);
    assert_eq!(cache.get(&"a"), Some(11));
    assert_eq!(cache.len(), 3);
}

/// SLRU: promotion moves nodes across two lists; the map entry must follow
/// without any stale borrow of the old location.
#[test]
fn test_slru_aliasing_across_promotion() {
    let mut cache = SlruCache::new(6, 0.5).unwrap();

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    for _ in 0..3 {
        assert_eq!(cache.get(&"a"), Some(1)); // promotes, then protected hits
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    cache.set("b", 22); // protected update in place
    assert_eq!(cache.get(&"b"), Some(22));
    assert_eq!(cache.len(), 3);
}

/// LFU: every touch splices the item into another bucket and may create or
/// destroy bucket nodes around it.
#[test]
fn test_lfu_aliasing_across_bucket_moves() {
    let mut cache = LfuCache::new(10).unwrap();

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);

    for _ in 0..3 {
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"b"), Some(2));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    assert!(cache.del(&"b"));
    cache.set("d", 4);
    assert_eq!(cache.get(&"d"), Some(4));
    assert_eq!(cache.len(), 3);
}

/// LIRS: promotions move nodes between S and Q while twins hold raw
/// cross-references; evictions rewrite the twin in place.
#[test]
fn test_lirs_aliasing_across_promotions_and_shadows() {
    let mut cache = LirsCache::new(3, 0.34).unwrap();

    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3); // c resident in Q with a stack twin

    assert_eq!(cache.get(&"c"), Some(3)); // promote c, demote a
    assert_eq!(cache.get(&"a"), Some(1)); // Q-only hit re-enters the stack
    assert_eq!(cache.get(&"a"), Some(1)); // twin hit promotes again

    cache.set("d", 4); // evicts the Q tail, leaving a shadow
    assert_eq!(cache.get(&"d"), Some(4));
    assert!(cache.len() <= 3);
}

/// Mixed churn across all four caches to widen Miri's coverage of
/// interleaved operations.
#[test]
fn test_intensive_cache_operations_under_miri() {
    let mut lru = LruCache::new(8).unwrap();
    let mut slru = SlruCache::new(8, 0.25).unwrap();
    let mut lfu = LfuCache::new(8).unwrap();
    let mut lirs = LirsCache::new(8, 0.25).unwrap();

    for i in 0..64usize {
        let key = i % 13;
        lru.set(key, i);
        slru.set(key, i);
        lfu.set(key, i);
        lirs.set(key, i);

        if i % 2 == 0 {
            let probe = i % 7;
            let _ = lru.get(&probe);
            let _ = slru.get(&probe);
            let _ = lfu.get(&probe);
            let _ = lirs.get(&probe);
        }

        if i % 9 == 0 {
            let victim = i % 5;
            let _ = lru.del(&victim);
            let _ = slru.del(&victim);
            let _ = lfu.del(&victim);
            let _ = lirs.del(&victim);
        }
    }

    assert!(lru.len() <= 8);
    assert!(slru.len() <= 8);
    assert!(lfu.len() <= 8);
    assert!(lirs.len() <= 8);

    lru.clear();
    slru.clear();
    lfu.clear();
    lirs.clear();
}
