//! Benchmarks for isoline building, filtering and annotation.
//!
//! Run with: cargo bench --package isolines --bench isoline_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isolines::{
    generate_levels, CompositeFilter, IsolineBuilder, IsolineCollection, IsolineConfig,
    IsolineTextAnnotater, Point, PointFilter, Rect, ScalarField2D,
};
use rand::Rng;

/// Generate a smooth field with hills and valleys.
fn generate_smooth_field(width: usize, height: usize) -> ScalarField2D {
    ScalarField2D::from_fn(width, height, Point::new(0.0, 0.0), Point::new(1.0, 1.0), |p| {
        let fx = p.x / width as f64;
        let fy = p.y / height as f64;

        // Overlapping sine waves for a realistic pattern
        let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
        let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
        let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

        50.0 + v1 + v2 + v3
    })
    .expect("valid benchmark field")
}

/// Generate a field with random noise (many short lines and saddles).
fn generate_noisy_field(width: usize, height: usize) -> ScalarField2D {
    let mut rng = rand::thread_rng();
    let base = generate_smooth_field(width, height);
    let data = base
        .data()
        .iter()
        .map(|&v| v + rng.gen_range(-5.0..5.0))
        .collect();
    ScalarField2D::new(width, height, data, base.grid().to_vec()).expect("valid benchmark field")
}

fn build_collection(width: usize, height: usize) -> IsolineCollection {
    IsolineBuilder::with_field(generate_smooth_field(width, height))
        .build()
        .expect("smooth field builds")
}

// =============================================================================
// LEVEL GENERATION BENCHMARKS
// =============================================================================

fn bench_generate_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_levels");

    for density in [1usize, 12, 100] {
        group.bench_with_input(BenchmarkId::new("density", density), &density, |b, &density| {
            b.iter(|| generate_levels(black_box(0.0), black_box(100.0), density));
        });
    }

    group.finish();
}

// =============================================================================
// SINGLE LEVEL BENCHMARKS
// =============================================================================

fn bench_build_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_level");

    let sizes = [(64, 64), (128, 128), (256, 256), (512, 512)];

    for (width, height) in sizes {
        let mut smooth = IsolineBuilder::with_field(generate_smooth_field(width, height));
        let mut noisy = IsolineBuilder::with_field(generate_noisy_field(width, height));

        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_function(
            BenchmarkId::new("smooth_single_level", format!("{}x{}", width, height)),
            |b| {
                b.iter(|| smooth.build_level(black_box(50.0)));
            },
        );

        // More lines and saddle cells
        group.bench_function(
            BenchmarkId::new("noisy_single_level", format!("{}x{}", width, height)),
            |b| {
                b.iter(|| noisy.build_level(black_box(50.0)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// FULL BUILD BENCHMARKS
// =============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    for (width, height) in [(128, 128), (256, 256)] {
        let field = std::sync::Arc::new(generate_smooth_field(width, height));

        for density in [4usize, 12, 20] {
            let mut builder = IsolineBuilder::with_field(field.clone());
            builder
                .set_density(density)
                .expect("non-zero density");

            group.bench_function(
                BenchmarkId::new(format!("{}_levels", density), format!("{}x{}", width, height)),
                |b| {
                    b.iter(|| builder.build());
                },
            );

            group.bench_function(
                BenchmarkId::new(
                    format!("{}_levels_parallel", density),
                    format!("{}x{}", width, height),
                ),
                |b| {
                    b.iter(|| builder.build_parallel());
                },
            );
        }
    }

    group.finish();
}

// =============================================================================
// FILTER BENCHMARKS
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    let collection = build_collection(256, 256);
    group.throughput(Throughput::Elements(collection.total_points() as u64));

    let mut composite = CompositeFilter::from_config(&IsolineConfig::default());
    composite.set_visible_rect(Rect::new(0.0, 0.0, 256.0, 256.0));

    group.bench_function("composite_256x256", |b| {
        b.iter(|| collection.filtered(black_box(&composite)));
    });

    group.finish();
}

// =============================================================================
// ANNOTATION BENCHMARKS
// =============================================================================

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");

    let collection = build_collection(256, 256);
    let visible = Rect::new(0.0, 0.0, 256.0, 256.0);

    for spacing in [5.0f64, 20.0, 80.0] {
        let annotater = IsolineTextAnnotater::new(spacing);
        group.bench_with_input(BenchmarkId::new("spacing", spacing), &annotater, |b, annotater| {
            b.iter(|| annotater.annotate(black_box(&collection), visible));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_levels,
    bench_build_level,
    bench_build,
    bench_filters,
    bench_annotate,
);
criterion_main!(benches);
