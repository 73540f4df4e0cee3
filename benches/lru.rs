use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;
use lrukit::policy::weak_lru::{ArcWeakLruCache, RcWeakLruCache};
use std::rc::Rc;
use std::sync::Arc;

fn bench_lru_put_get(c: &mut Criterion) {
    c.bench_function("lru_put_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.put(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_touch_hotset(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(4096);
                for i in 0..4096u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_weak_lru_get_live(c: &mut Criterion) {
    let owners: Vec<_> = (0..1024u64).map(Rc::new).collect();
    c.bench_function("weak_lru_get_live", |b| {
        b.iter_batched(
            || {
                let mut cache = RcWeakLruCache::new(1024);
                for (i, owner) in owners.iter().enumerate() {
                    cache.put(i as u64, owner);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_weak_lru_purge_half_expired(c: &mut Criterion) {
    c.bench_function("weak_lru_purge_half_expired", |b| {
        b.iter_batched(
            || {
                let mut cache = ArcWeakLruCache::new(1024);
                let mut survivors = Vec::with_capacity(512);
                for i in 0..1024u64 {
                    let owner = Arc::new(i);
                    cache.put(i, &owner);
                    if i % 2 == 0 {
                        survivors.push(owner);
                    }
                }
                (cache, survivors)
            },
            |(mut cache, survivors)| {
                let _ = std::hint::black_box(cache.purge_expired());
                drop(survivors);
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_put_get,
    bench_lru_eviction_churn,
    bench_lru_touch_hotset,
    bench_weak_lru_get_live,
    bench_weak_lru_purge_half_expired
);
criterion_main!(benches);
