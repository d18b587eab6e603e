//! Benchmarks for the noise field and per-frame evaluation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ringshard::config::RingConfig;
use ringshard::spawn::ParticleBuffer;
use ringshard::{noise, transform, Vec3};

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise");

    group.bench_function("simplex", |b| {
        let p = Vec3::new(1.7, -0.3, 2.9);
        b.iter(|| black_box(noise::noise(black_box(p))))
    });

    group.bench_function("curl", |b| {
        let p = Vec3::new(1.7, -0.3, 2.9);
        b.iter(|| black_box(noise::curl(black_box(p))))
    });

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_all");

    for count in [1_000u32, 5_000, 20_000] {
        let config = RingConfig {
            particles: count,
            noise_strength: 0.5,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate(&config);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(transform::transform_all(black_box(1.5), &buffer, &config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_noise, bench_transform);
criterion_main!(benches);
