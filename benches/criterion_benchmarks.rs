use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use intelligent_cache::config::IntelligentCacheConfig;
use intelligent_cache::pattern::{AccessPattern, AccessPatternGenerator};
use intelligent_cache::{EvictionStrategy, IntelligentCache};

const ENTRY_COUNT: u64 = 1000;
const ENTRY_SIZE_KB: u64 = 4;

// Helper to create a full cache with the given strategy
fn make_full_cache(strategy: EvictionStrategy) -> IntelligentCache<u64, u64> {
    let config = IntelligentCacheConfig {
        max_size_bytes: ENTRY_COUNT * ENTRY_SIZE_KB * 1024,
        strategy,
        seed: Some(42),
        ..Default::default()
    };
    let mut cache = IntelligentCache::new(config);
    for i in 0..ENTRY_COUNT {
        cache.put(i, i, ENTRY_SIZE_KB);
    }
    cache
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cache Operations");

    {
        let mut cache = make_full_cache(EvictionStrategy::Lru);

        group.bench_function("get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % ENTRY_COUNT)));
                }
            });
        });

        group.bench_function("get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + ENTRY_COUNT)));
                }
            });
        });
    }

    // Every put into a full cache triggers one O(n) eviction scan.
    for strategy in EvictionStrategy::all() {
        group.bench_function(format!("{strategy} put with eviction"), |b| {
            b.iter_batched(
                || make_full_cache(strategy),
                |mut cache| {
                    for i in 0..100 {
                        cache.put(ENTRY_COUNT + i, i, ENTRY_SIZE_KB);
                    }
                    black_box(cache.stats())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();

    let mut group = c.benchmark_group("Pattern Generation");
    for pattern in AccessPattern::all() {
        group.bench_function(format!("{pattern} over 1000 keys"), |b| {
            let mut generator = AccessPatternGenerator::with_seed(7);
            generator.generate_keys(1000);
            generator.set_pattern(pattern);
            b.iter(|| {
                generator.generate_sequence();
                black_box(generator.next_access().map(str::len))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
