//! Timing of the ridge detector on synthetic frontal fields.
//!
//! Run with: cargo bench -p ridgefield-hessian (add `--features rayon` for the
//! parallel classification loop).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ridgefield_core::{CoordAxis, LatLonGrid};
use ridgefield_hessian::{DifferenceScheme, RidgeDetector, RidgeParams};
use std::time::Duration;

/// Meandering front across a mid-latitude box at 0.25° resolution.
fn frontal_field(rows: usize, cols: usize) -> LatLonGrid {
    LatLonGrid::from_fn(
        CoordAxis::linspace("latitude", 30.0, 0.25, rows),
        CoordAxis::linspace("longitude", -60.0, 0.25, cols),
        |phi, lambda| {
            let axis = 45.0 + 3.0 * (lambda * 0.15).sin();
            280.0 + 8.0 * (-(phi - axis).powi(2) / 4.0).exp() + 0.2 * (lambda * 0.7).cos()
        },
    )
    .expect("synthetic grid")
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("ridge detect");
    group.measurement_time(Duration::from_secs(5));

    for &(rows, cols) in &[(64, 128), (128, 256), (241, 481)] {
        let grid = frontal_field(rows, cols);
        group.throughput(Throughput::Elements((rows * cols) as u64));
        for scheme in [DifferenceScheme::FirstOrder, DifferenceScheme::SecondOrder] {
            let detector = RidgeDetector::new(RidgeParams {
                scheme,
                ..RidgeParams::default()
            })
            .expect("params");
            group.bench_with_input(
                BenchmarkId::new(scheme.as_str(), format!("{rows}x{cols}")),
                &grid,
                |b, g| b.iter(|| detector.detect(black_box(g)).expect("detect")),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
