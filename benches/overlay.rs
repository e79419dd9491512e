//! Benchmarks for overlay layout and snowfall generation.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.

use advent::assets::AssetConfig;
use advent::layout::{build_overlay, layout_cells, GridGeometry};
use advent::render::{render_calendar, TextBackend};
use advent::snowfall::{FlakeGenerator, SnowfallConfig};
use advent::types::{Bounds, DateSource, DateState};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmark positioning all 25 cells at several container sizes
fn bench_layout_cells(c: &mut Criterion) {
    let geometry = GridGeometry::default();
    let state = DateState::overridden(12, DateSource::Url);
    let mut group = c.benchmark_group("layout_cells");

    for (width, height) in [(360.0, 640.0), (1000.0, 800.0), (2560.0, 1440.0)] {
        let bounds = Bounds::new(width, height);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &bounds,
            |b, &bounds| b.iter(|| layout_cells(black_box(&state), &geometry, bounds)),
        );
    }

    group.finish();
}

/// Benchmark a full view-model pass including image candidates
fn bench_build_overlay(c: &mut Criterion) {
    let geometry = GridGeometry::default();
    let assets = AssetConfig::default();
    let bounds = Bounds::new(1000.0, 800.0);

    c.bench_function("build_overlay_day_25", |b| {
        let state = DateState::overridden(25, DateSource::Url);
        b.iter(|| build_overlay(black_box(&state), &geometry, &assets, bounds));
    });
}

/// Benchmark the text backend used by the CLI
fn bench_text_render(c: &mut Criterion) {
    let state = DateState::overridden(18, DateSource::Url);
    let view = build_overlay(
        &state,
        &GridGeometry::default(),
        &AssetConfig::default(),
        Bounds::new(1000.0, 800.0),
    );

    c.bench_function("text_render", |b| {
        b.iter(|| {
            let mut backend = TextBackend::new();
            let _ = render_calendar(&mut backend, black_box(&view));
            backend.into_output()
        });
    });
}

/// Benchmark generating a desktop screen's worth of flakes
fn bench_flakes(c: &mut Criterion) {
    let config = SnowfallConfig::default();

    c.bench_function("generate_desktop_flakes", |b| {
        b.iter(|| {
            let mut generator = FlakeGenerator::new(StdRng::seed_from_u64(42), config.clone(), false);
            let count = generator.target_count();
            (0..count).map(|_| generator.next_flake()).collect::<Vec<_>>()
        });
    });
}

criterion_group!(
    benches,
    bench_layout_cells,
    bench_build_overlay,
    bench_text_render,
    bench_flakes,
);

criterion_main!(benches);
