//! Benchmarks for curve sampling and the per-frame driver step.

#![allow(unused_results, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;
use superformula::animation::{exponents_at, AnimationDriver, SCALE};
use superformula::config::{HarmonicCounts, RunConfig};
use superformula::curve::{sample_shape_into, ShapeParams};
use superformula::surface::recording::RecordingSurface;

fn radius_benchmark(c: &mut Criterion) {
    let (n2, n3) = exponents_at(17);
    let params = ShapeParams::with_harmonic(10.0, n2, n3);
    c.bench_function("radius_at", |b| {
        b.iter(|| black_box(params.radius_at(black_box(1.234))))
    });
}

fn sample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_shape");

    for step in [0.05, 0.005, 0.001] {
        let (n2, n3) = exponents_at(42);
        let params = ShapeParams::with_harmonic(30.0, n2, n3);
        let mut buffer = Vec::new();
        group.bench_function(format!("step_{step}"), |b| {
            b.iter(|| {
                sample_shape_into(
                    &params,
                    DVec2::new(250.0, 250.0),
                    SCALE,
                    black_box(step),
                    &mut buffer,
                );
                black_box(buffer.len())
            })
        });
    }

    group.finish();
}

fn frame_benchmark(c: &mut Criterion) {
    let config = RunConfig {
        interval: u32::MAX,
        delay_ms: 0,
        ..RunConfig::default()
    };
    let mut driver = AnimationDriver::new(config, HarmonicCounts::default());
    let mut surface = RecordingSurface::discarding_points();

    c.bench_function("driver_step_default_config", |b| {
        b.iter(|| {
            let state = driver.step(&mut surface);
            surface.clear_log();
            black_box(state.is_ok())
        })
    });
}

criterion_group!(
    benches,
    radius_benchmark,
    sample_benchmark,
    frame_benchmark
);
criterion_main!(benches);
