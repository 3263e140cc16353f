use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qtty::{Days, Hours};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

use transit_lab::models::{OutputMode, TransitParameters};
use transit_lab::services::{add_gaussian_noise, generate, synthesize, LightCurveRequest};

fn params(points: usize) -> TransitParameters {
    TransitParameters::new(Days::new(3.5), Hours::new(2.5), 500.0, 0.3).with_point_count(points)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for points in [1_000usize, 10_000, 100_000] {
        let p = params(points);
        group.bench_with_input(BenchmarkId::new("time", points), &p, |b, p| {
            b.iter(|| generate(black_box(p), OutputMode::Time));
        });
    }

    let multi = params(1_000).with_period_count(20);
    group.bench_function("phase_20_periods", |b| {
        b.iter(|| generate(black_box(&multi), OutputMode::Phase));
    });

    group.finish();
}

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise");

    let clean = vec![1.0; 10_000];
    group.bench_function("gaussian_10k", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| add_gaussian_noise(black_box(&clean), 1e-4, &mut rng));
    });

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    let request = LightCurveRequest::new(params(1_000)).with_snr(10.0);
    group.bench_function("snr_1k", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| synthesize(black_box(&request), &mut rng));
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_noise, bench_synthesize);
criterion_main!(benches);
