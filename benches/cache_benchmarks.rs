// Simple benchmarks using criterion instead of unstable test feature
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use policy_cache::{LfuCache, LirsCache, LruCache, SlruCache};

// Benchmark configuration
const CACHE_SIZE: usize = 1_000;
const NUM_OPERATIONS: usize = 10_000;
const KEY_SPACE: usize = CACHE_SIZE * 4;

// Simple linear congruential generator for reproducible benchmarks
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 16
    }

    fn next_key(&mut self) -> usize {
        self.next() as usize % KEY_SPACE
    }
}

fn bench_lru(c: &mut Criterion) {
    c.bench_function("lru_set", |b| {
        b.iter(|| {
            let mut cache = LruCache::new(CACHE_SIZE).unwrap();
            let mut rng = Lcg::new(42);
            for i in 0..NUM_OPERATIONS {
                cache.set(black_box(rng.next_key()), i);
            }
        })
    });

    c.bench_function("lru_mixed", |b| {
        b.iter(|| {
            let mut cache = LruCache::new(CACHE_SIZE).unwrap();
            let mut rng = Lcg::new(42);
            for i in 0..NUM_OPERATIONS {
                let key = rng.next_key();
                if i % 4 == 0 {
                    cache.set(black_box(key), i);
                } else {
                    black_box(cache.get(&key));
                }
            }
        })
    });
}

fn bench_slru(c: &mut Criterion) {
    c.bench_function("slru_mixed", |b| {
        b.iter(|| {
            let mut cache = SlruCache::new(CACHE_SIZE, 0.2).unwrap();
            let mut rng = Lcg::new(42);
            for i in 0..NUM_OPERATIONS {
                let key = rng.next_key();
                if i % 4 == 0 {
                    cache.set(black_box(key), i);
                } else {
                    black_box(cache.get(&key));
                }
            }
        })
    });
}

fn bench_lfu(c: &mut Criterion) {
    c.bench_function("lfu_mixed", |b| {
        b.iter(|| {
            let mut cache = LfuCache::new(CACHE_SIZE).unwrap();
            let mut rng = Lcg::new(42);
            for i in 0..NUM_OPERATIONS {
                let key = rng.next_key();
                if i % 4 == 0 {
                    cache.set(black_box(key), i);
                } else {
                    black_box(cache.get(&key));
                }
            }
        })
    });

    // Hammer a small hot set so items climb through many frequency buckets.
    c.bench_function("lfu_hot_keys", |b| {
        b.iter(|| {
            let mut cache = LfuCache::new(CACHE_SIZE).unwrap();
            let mut rng = Lcg::new(7);
            for i in 0..CACHE_SIZE {
                cache.set(i, i);
            }
            for _ in 0..NUM_OPERATIONS {
                black_box(cache.get(&(rng.next() as usize % 16)));
            }
        })
    });
}

fn bench_lirs(c: &mut Criterion) {
    c.bench_function("lirs_mixed", |b| {
        b.iter(|| {
            let mut cache = LirsCache::new(CACHE_SIZE, 0.05).unwrap();
            let mut rng = Lcg::new(42);
            for i in 0..NUM_OPERATIONS {
                let key = rng.next_key();
                if i % 4 == 0 {
                    cache.set(black_box(key), i);
                } else {
                    black_box(cache.get(&key));
                }
            }
        })
    });

    // Sequential scan twice the cache size: the access pattern LIRS is for.
    c.bench_function("lirs_scan", |b| {
        b.iter(|| {
            let mut cache = LirsCache::new(CACHE_SIZE, 0.05).unwrap();
            for round in 0..4 {
                for key in 0..(CACHE_SIZE * 2) {
                    if round % 2 == 0 {
                        cache.set(black_box(key), key);
                    } else {
                        black_box(cache.get(&key));
                    }
                }
            }
        })
    });
}

criterion_group!(benches, bench_lru, bench_slru, bench_lfu, bench_lirs);
criterion_main!(benches);
