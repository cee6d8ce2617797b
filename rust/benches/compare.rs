//! Comparison kernels against native Rust loops.
//!
//! Run with:
//! ```bash
//! cargo bench --bench compare
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use eachops::{Dispatcher, Registry};


pub fn less_than_benchmark(c: &mut Criterion) {
    let dimensions = native::dimensions();
    let x: Vec<f32> = native::generate_random_vector(dimensions);
    let y: Vec<f32> = native::generate_random_vector(dimensions);
    let mut ans = vec![false; dimensions];

    let specialized = Dispatcher::specialized(Registry::new());

    let mut group = c.benchmark_group("LessThan f32");
    group.bench_with_input(BenchmarkId::new("Fallback", dimensions), &dimensions, |b, _| {
        b.iter(|| eachops::less_than(black_box(&x), black_box(&y), &mut ans))
    });
    group.bench_with_input(BenchmarkId::new("Empty Registry", dimensions), &dimensions, |b, _| {
        b.iter(|| specialized.less_than(black_box(&x), black_box(&y), &mut ans))
    });
    group.bench_with_input(BenchmarkId::new("Rust Native", dimensions), &dimensions, |b, _| {
        b.iter(|| native::less_than_f32_cpu(black_box(&x), black_box(&y), &mut ans))
    });
    group.finish();
}

pub fn equals_benchmark(c: &mut Criterion) {
    let dimensions = native::dimensions();
    let x: Vec<u8> = native::generate_random_vector(dimensions);
    let mut ans = vec![false; dimensions];

    let mut group = c.benchmark_group("Equals u8 scalar");
    group.bench_with_input(BenchmarkId::new("Fallback", dimensions), &dimensions, |b, _| {
        b.iter(|| eachops::equals_scalar(black_box(&x), black_box(42_u8), &mut ans))
    });
    group.bench_with_input(BenchmarkId::new("Rust Native", dimensions), &dimensions, |b, _| {
        b.iter(|| native::equals_scalar_u8_cpu(black_box(&x), black_box(42), &mut ans))
    });
    group.finish();
}

criterion_group!(benches, less_than_benchmark, equals_benchmark);
criterion_main!(benches);
