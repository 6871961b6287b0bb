//! # Chunk Hashmap Benchmark
//!
//! Dense set/get over a tile map and free-chunk filing of moving objects.
//!
//! Run with: `cargo bench --package tessera_spatial`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_core::EntityHandle;
use tessera_spatial::{FreeChunkHashmap2D, GridChunkHashmap2D};

const SIDE: i32 = 256;

fn bench_dense_fill_and_read(c: &mut Criterion) {
    c.bench_function("dense_fill_256x256", |b| {
        b.iter(|| {
            let mut map = GridChunkHashmap2D::new(16);
            for y in -SIDE / 2..SIDE / 2 {
                for x in -SIDE / 2..SIDE / 2 {
                    map.set_obj((x, y), EntityHandle::new(u64::from(x.unsigned_abs()), 1));
                }
            }
            black_box(map.chunk_count())
        });
    });

    let mut map = GridChunkHashmap2D::new(16);
    for y in 0..SIDE {
        for x in 0..SIDE {
            map.set_obj((x, y), EntityHandle::new(u64::from(x.unsigned_abs()), 1));
        }
    }

    c.bench_function("dense_read_256x256", |b| {
        b.iter(|| {
            let mut valid = 0usize;
            for y in 0..SIDE {
                for x in 0..SIDE {
                    if map.get_obj((x, y)).is_valid() {
                        valid += 1;
                    }
                }
            }
            black_box(valid)
        });
    });
}

fn bench_free_refile(c: &mut Criterion) {
    c.bench_function("free_refile_10k", |b| {
        b.iter(|| {
            let mut buckets = FreeChunkHashmap2D::new(32);
            for id in 0..10_000u64 {
                let handle = EntityHandle::new(id, 1);
                let x = i32::try_from(id % 1_000).unwrap_or_default();
                buckets.insert((x, 0), handle);
                buckets.remove((x, 0), handle);
                buckets.insert((x + 40, 0), handle);
            }
            black_box(buckets.chunk_count())
        });
    });
}

criterion_group!(benches, bench_dense_fill_and_read, bench_free_refile);
criterion_main!(benches);
