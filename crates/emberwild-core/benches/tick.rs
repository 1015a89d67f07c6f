//! Tick loop benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emberwild_core::persistence::{decode, encode};
use emberwild_core::prelude::*;

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for animals in [10usize, 100, 1000].iter() {
        let config = SimConfig {
            initial_animals: *animals,
            ..SimConfig::seeded(42)
        };
        let Ok(mut store) = GameStore::new_world(config) else {
            continue;
        };

        // Warm up
        for _ in 0..60 {
            store.tick(1.0 / 60.0);
        }

        group.bench_with_input(BenchmarkId::new("animals", animals), animals, |b, _| {
            b.iter(|| {
                store.tick(black_box(1.0 / 60.0));
                store.drain_events();
            });
        });
    }

    group.finish();
}

fn benchmark_snapshot_codec(c: &mut Criterion) {
    let Ok(store) = GameStore::new_world(SimConfig::seeded(7)) else {
        return;
    };
    let snapshot = store.snapshot();

    c.bench_function("snapshot_encode", |b| {
        b.iter(|| encode(black_box(&snapshot)))
    });

    if let Ok(bytes) = encode(&snapshot) {
        c.bench_function("snapshot_decode", |b| b.iter(|| decode(black_box(&bytes))));
    }
}

criterion_group!(benches, benchmark_tick, benchmark_snapshot_codec);
criterion_main!(benches);
