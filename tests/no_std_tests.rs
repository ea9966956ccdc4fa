// Validates that the crate's public surface works from a no_std (alloc-only)
// consumer. The test harness itself links std, but everything used from the
// crate goes through core/alloc paths.

#![no_std]
extern crate alloc;
extern crate policy_cache;

use alloc::string::String;
use alloc::vec::Vec;
use policy_cache::config::{LfuCacheConfig, LirsCacheConfig, LruCacheConfig, SlruCacheConfig};
use policy_cache::{LfuCache, LirsCache, LruCache, SlruCache};

fn make_lru<K: core::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LruCache<K, V> {
    LruCache::init(LruCacheConfig { capacity: cap }).unwrap()
}

fn make_slru<K: core::hash::Hash + Eq + Clone, V: Clone>(
    cap: usize,
    probation_ratio: f64,
) -> SlruCache<K, V> {
    SlruCache::init(SlruCacheConfig {
        capacity: cap,
        probation_ratio,
    })
    .unwrap()
}

fn make_lfu<K: core::hash::Hash + Eq + Clone, V: Clone>(cap: usize) -> LfuCache<K, V> {
    LfuCache::init(LfuCacheConfig { capacity: cap }).unwrap()
}

fn make_lirs<K: core::hash::Hash + Eq + Clone, V: Clone>(
    cap: usize,
    hirs_ratio: f64,
) -> LirsCache<K, V> {
    LirsCache::init(LirsCacheConfig {
        capacity: cap,
        hirs_ratio,
    })
    .unwrap()
}

#[test]
fn test_no_std_lru_with_alloc_types() {
    let mut cache: LruCache<String, Vec<u8>> = make_lru(2);

    cache.set(String::from("a"), alloc::vec![1, 2, 3]);
    cache.set(String::from("b"), alloc::vec![4]);

    assert_eq!(cache.get("a"), Some(alloc::vec![1, 2, 3]));
    cache.set(String::from("c"), alloc::vec![5]); // evicts "b"
    assert_eq!(cache.get("b"), None);
}

#[test]
fn test_no_std_all_policies_round_trip() {
    let mut lru = make_lru(4);
    let mut slru = make_slru(4, 0.5);
    let mut lfu = make_lfu(4);
    let mut lirs = make_lirs(4, 0.3);

    for i in 0..4 {
        lru.set(i, i * 10);
        slru.set(i, i * 10);
        lfu.set(i, i * 10);
        lirs.set(i, i * 10);
    }

    // Key 3 is the newest insert and resident under every policy (SLRU's
    // probation segment only holds the last two admissions).
    assert_eq!(lru.get(&3), Some(30));
    assert_eq!(slru.get(&3), Some(30));
    assert_eq!(lfu.get(&3), Some(30));
    assert_eq!(lirs.get(&3), Some(30));

    assert!(lru.del(&3));
    assert!(slru.del(&3));
    assert!(lfu.del(&3));
    assert!(lirs.del(&3));
}
