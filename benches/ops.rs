//! Insert, contains and remove throughput benchmarks.
//! 插入、查询和移除吞吐基准测试

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use loadaware_cuckoo_filter::{CuckooFilter, CuckooFilterBuilder};

fn gen_keys(n: usize, seed: u64) -> Vec<Vec<u8>> {
    fastrand::seed(seed);
    (0..n)
        .map(|_| {
            let len = fastrand::usize(8..=64);
            (0..len).map(|_| fastrand::u8(..)).collect()
        })
        .collect()
}

fn insert(c: &mut Criterion) {
    let keys = gen_keys(100_000, 1);

    c.bench_function("insert", |b| {
        let mut filter = CuckooFilterBuilder::new().capacity(1 << 18).seed(1).finish();
        let mut i = 0;
        b.iter(|| {
            let r = filter.insert(&keys[i % keys.len()]);
            i += 1;
            // Keep the filter out of saturation so inserts stay comparable
            // 保持过滤器远离饱和，使插入结果可比
            if filter.load_factor() > 0.9 {
                filter.reset();
            }
            black_box(r)
        })
    });
}

fn contains(c: &mut Criterion) {
    let keys = gen_keys(50_000, 2);
    let mut filter = CuckooFilter::new(1 << 17);
    for key in &keys {
        filter.insert(key);
    }

    c.bench_function("contains_hit", |b| {
        let mut i = 0;
        b.iter(|| {
            let r = filter.contains(&keys[i % keys.len()]);
            i += 1;
            black_box(r)
        })
    });

    let misses = gen_keys(50_000, 3);
    c.bench_function("contains_miss", |b| {
        let mut i = 0;
        b.iter(|| {
            let r = filter.contains(&misses[i % misses.len()]);
            i += 1;
            black_box(r)
        })
    });
}

fn remove(c: &mut Criterion) {
    let keys = gen_keys(50_000, 4);

    c.bench_function("remove", |b| {
        let mut filter = CuckooFilter::new(1 << 17);
        for key in &keys {
            filter.insert(key);
        }
        let mut i = 0;
        b.iter(|| {
            let key = &keys[i % keys.len()];
            if !filter.remove(key) {
                filter.insert(key);
            }
            i += 1;
        })
    });
}

criterion_group!(benches, insert, contains, remove);
criterion_main!(benches);
