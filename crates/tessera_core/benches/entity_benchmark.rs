//! # Entity & Component Benchmark
//!
//! Churn through create/destroy cycles and component add/get.
//!
//! Run with: `cargo bench --package tessera_core`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{ComponentManager, EntityManager};

#[derive(Clone, Copy, Default)]
struct Position {
    x: f32,
    y: f32,
}

fn bench_create_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("entity_churn");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut entities = EntityManager::default();
                let handles: Vec<_> = (0..count).map(|_| entities.create_entity()).collect();
                for handle in &handles {
                    entities.destroy_entity(*handle);
                }
                // Second pass recycles every id.
                for _ in 0..count {
                    black_box(entities.create_entity());
                }
                entities.alive_count()
            });
        });
    }

    group.finish();
}

fn bench_component_lookup(c: &mut Criterion) {
    let mut entities = EntityManager::default();
    let mut components = ComponentManager::new();
    components.register_component::<Position>();

    let handles: Vec<_> = (0..10_000)
        .map(|i| {
            let e = entities.create_entity();
            #[allow(clippy::cast_precision_loss)]
            let f = i as f32;
            components.add_component(e, Position { x: f, y: -f });
            e
        })
        .collect();

    c.bench_function("get_component_10k", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for handle in &handles {
                if let Some(p) = components.get_component::<Position>(*handle) {
                    sum += p.x + p.y;
                }
            }
            black_box(sum)
        });
    });
}

criterion_group!(benches, bench_create_destroy, bench_component_lookup);
criterion_main!(benches);
