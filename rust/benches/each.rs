//! Arithmetic and bitwise kernels against native Rust loops.
//!
//! Run with:
//! ```bash
//! cargo bench --bench each
//!
//! # Or with custom dimensions:
//! EACHOPS_BENCH_DIMENSIONS=4096 cargo bench --bench each
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eachops::{Add, Dispatcher, Operands, Registry, Result};


fn add_f32_unrolled(operands: Operands<'_, f32>, ans: &mut [f32]) -> Result<()> {
    if let Operands::VectorVector(x, y) = operands {
        for ((slot, a), b) in ans.chunks_exact_mut(4).zip(x.chunks_exact(4)).zip(y.chunks_exact(4)) {
            slot[0] = a[0] + b[0];
            slot[1] = a[1] + b[1];
            slot[2] = a[2] + b[2];
            slot[3] = a[3] + b[3];
        }
        let tail = ans.len() - ans.len() % 4;
        for i in tail..ans.len() {
            ans[i] = x[i] + y[i];
        }
        return Ok(());
    }
    eachops::fallback::apply::<Add, f32>(operands, ans)
}

pub fn add_benchmark(c: &mut Criterion) {
    let dimensions = native::dimensions();
    let x: Vec<f32> = native::generate_random_vector(dimensions);
    let y: Vec<f32> = native::generate_random_vector(dimensions);
    let mut ans = vec![0.0_f32; dimensions];

    let plain = Dispatcher::new();
    let tuned = Dispatcher::specialized(Registry::new().with::<Add, f32>(add_f32_unrolled));

    let mut group = c.benchmark_group(format!("Add f32 {dimensions}d"));
    group.bench_function("Fallback", |b| {
        b.iter(|| plain.add(black_box(&x), black_box(&y), &mut ans))
    });
    group.bench_function("Registry", |b| {
        b.iter(|| tuned.add(black_box(&x), black_box(&y), &mut ans))
    });
    group.bench_function("Rust Native", |b| {
        b.iter(|| native::add_f32_cpu(black_box(&x), black_box(&y), &mut ans))
    });
    group.finish();
}

pub fn multiply_benchmark(c: &mut Criterion) {
    let dimensions = native::dimensions();
    let x: Vec<f64> = native::generate_random_vector(dimensions);
    let mut ans = vec![0.0_f64; dimensions];

    let mut group = c.benchmark_group(format!("Multiply f64 by scalar {dimensions}d"));
    group.bench_function("Fallback", |b| {
        b.iter(|| eachops::multiply_scalar(black_box(&x), black_box(0.5), &mut ans))
    });
    group.bench_function("Rust Native", |b| {
        b.iter(|| native::multiply_scalar_f64_cpu(black_box(&x), black_box(0.5), &mut ans))
    });
    group.finish();
}

pub fn divide_benchmark(c: &mut Criterion) {
    let dimensions = native::dimensions();
    let x: Vec<i32> = native::generate_random_vector(dimensions);
    let y = native::generate_random_divisors(dimensions);
    let mut ans = vec![0_i32; dimensions];

    let mut group = c.benchmark_group(format!("Divide i32 {dimensions}d"));
    group.bench_function("Fallback", |b| {
        b.iter(|| eachops::divide(black_box(&x), black_box(&y), &mut ans))
    });
    group.bench_function("Rust Native", |b| {
        b.iter(|| native::divide_i32_cpu(black_box(&x), black_box(&y), &mut ans))
    });
    group.finish();
}

pub fn bitxor_benchmark(c: &mut Criterion) {
    let dimensions = native::dimensions();
    let x: Vec<u64> = native::generate_random_vector(dimensions);
    let y: Vec<u64> = native::generate_random_vector(dimensions);
    let mut ans = vec![0_u64; dimensions];

    let mut group = c.benchmark_group(format!("BitXor u64 {dimensions}d"));
    group.bench_function("Fallback", |b| {
        b.iter(|| eachops::bitxor(black_box(&x), black_box(&y), &mut ans))
    });
    group.bench_function("Rust Native", |b| {
        b.iter(|| native::bitxor_u64_cpu(black_box(&x), black_box(&y), &mut ans))
    });
    group.finish();
}

criterion_group!(
    benches,
    add_benchmark,
    multiply_benchmark,
    divide_benchmark,
    bitxor_benchmark
);
criterion_main!(benches);
