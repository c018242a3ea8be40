//! Benchmarks for cmap operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use cmap_gradient::{
    ColorGradient, Evaluator, GradientConfig, ModelKind, NearestPointSolver, fit_curve, presets, sort_by_hue,
};
use cmap_math::{Vec3, linspace};
use cmap_space::{ColorSpaceGraph, ColorSpaceType, Illuminant, Observer, white_point};

fn sample_colors(n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Vec3::new(t, (t * 7.0).fract(), (t * 13.0).fract())
        })
        .collect()
}

/// Benchmark conversions from sRGB, routed once then applied per color.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let graph = ColorSpaceGraph::global();
    let white = white_point(Observer::Cie1931, Illuminant::D65);
    let colors = sample_colors(10000);
    group.throughput(Throughput::Elements(colors.len() as u64));

    for target in [
        ColorSpaceType::Rgb,
        ColorSpaceType::CieLab,
        ColorSpaceType::OkLch,
        ColorSpaceType::AcesAp1,
        ColorSpaceType::Hsl,
    ] {
        let conversion = graph
            .conversion(ColorSpaceType::Srgb, target, Some(white))
            .unwrap();
        group.bench_with_input(BenchmarkId::new("apply", target), &colors, |b, v| {
            b.iter(|| v.iter().map(|&c| conversion.apply(black_box(c))).collect::<Vec<_>>())
        });
    }

    group.bench_function("route_hsl_to_aces", |b| {
        b.iter(|| graph.route(black_box(ColorSpaceType::Hsl), black_box(ColorSpaceType::AcesAp1)))
    });

    group.finish();
}

/// Benchmark the piecewise evaluator and a fitted curve.
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let gradient = presets::warm_dusk().unwrap();
    let t = linspace(0.0, 1.0, 1024);
    group.throughput(Throughput::Elements(t.len() as u64));

    group.bench_function("evaluator", |b| {
        b.iter(|| t.iter().map(|&x| gradient.evaluate(black_box(x))).collect::<Vec<_>>())
    });
    group.bench_function("fitted_curve", |b| {
        b.iter(|| t.iter().map(|&x| gradient.evaluate_fit(black_box(x))).collect::<Vec<_>>())
    });

    group.finish();
}

/// Benchmark curve fitting per model.
fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    group.sample_size(10);

    let gradient = presets::ocean_sunset().unwrap();
    let config = *gradient.config();
    let evaluator = Evaluator::new(
        gradient.anchors(),
        gradient.weights(),
        config.mix_space,
        config.wraparound,
        config.observer,
        config.illuminant,
    )
    .unwrap();

    for model in [ModelKind::HornerPolynomial, ModelKind::Trigonometric, ModelKind::ChebyshevT, ModelKind::Gaussian] {
        let config = GradientConfig { model, ..config };
        group.bench_with_input(BenchmarkId::new("model", model), &config, |b, cfg| {
            b.iter(|| fit_curve(&evaluator, black_box(cfg)).unwrap())
        });
    }

    group.bench_function("gradient_new", |b| {
        b.iter(|| ColorGradient::new("bench", black_box(gradient.anchors().to_vec()), config).unwrap())
    });

    group.finish();
}

/// Benchmark nearest-point search and hue sorting.
fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let gradient = presets::warm_dusk().unwrap();
    let target = gradient.evaluate_fit(0.37);
    let solver = NearestPointSolver::default();

    group.bench_function("nearest_point", |b| {
        b.iter(|| solver.solve(gradient.curve(), black_box(target)).unwrap())
    });

    let palette = sample_colors(64);
    group.bench_function("sort_by_hue_64", |b| {
        b.iter(|| sort_by_hue(black_box(&palette), ColorSpaceType::Srgb).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_conversion, bench_evaluate, bench_fit, bench_queries);

criterion_main!(benches);
