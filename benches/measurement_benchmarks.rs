//! Measurement list benchmarks
//!
//! - Populate + close throughput for many detections
//! - Lookup on open (linear) vs closed (hashed) lists
//! - Float vs double backing stores

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use measurement_lists::{DoubleList, FloatList, MeasurementList, SchemaPool};
use rand::Rng;
use std::sync::Arc;

/// Typical cell measurement names
fn measurement_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Cell: Measurement {i}")).collect()
}

fn bench_populate_and_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate_close");
    let names = measurement_names(40);
    let mut rng = rand::thread_rng();
    let values: Vec<f64> = (0..names.len()).map(|_| rng.gen_range(0.0..1000.0)).collect();

    for &objects in &[1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("float", objects), &objects, |b, &objects| {
            b.iter(|| {
                let pool = Arc::new(SchemaPool::new());
                let lists: Vec<FloatList> = (0..objects)
                    .map(|_| {
                        let list = FloatList::new(Arc::clone(&pool));
                        for (name, value) in names.iter().zip(&values) {
                            list.put(name, *value);
                        }
                        list.close();
                        list
                    })
                    .collect();
                black_box(lists)
            });
        });

        group.bench_with_input(BenchmarkId::new("double", objects), &objects, |b, &objects| {
            b.iter(|| {
                let pool = Arc::new(SchemaPool::new());
                let lists: Vec<DoubleList> = (0..objects)
                    .map(|_| {
                        let list = DoubleList::new(Arc::clone(&pool));
                        for (name, value) in names.iter().zip(&values) {
                            list.put(name, *value);
                        }
                        list.close();
                        list
                    })
                    .collect();
                black_box(lists)
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for &count in &[8usize, 64] {
        let names = measurement_names(count);
        let pool = Arc::new(SchemaPool::new());
        let open = DoubleList::new(Arc::clone(&pool));
        let closed = DoubleList::new(Arc::clone(&pool));
        for name in &names {
            open.put(name, 1.0);
            closed.put(name, 1.0);
        }
        closed.close();
        let last = names[count - 1].as_str();

        group.bench_with_input(BenchmarkId::new("open", count), &last, |b, name| {
            b.iter(|| black_box(open.get(black_box(name))));
        });
        group.bench_with_input(BenchmarkId::new("closed", count), &last, |b, name| {
            b.iter(|| black_box(closed.get(black_box(name))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_populate_and_close, bench_lookup);
criterion_main!(benches);
