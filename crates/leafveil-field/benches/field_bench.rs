//! Benchmarks for the flicker field.
//!
//! Performance budgets:
//! - noise2() call: < 100ns
//! - field construction 100x100: < 2ms (scheduling dominates)
//! - whole-grid tick 80x24: < 300us
//! - whole-grid tick 120x40: < 800us
//! - whole-grid tick 240x80: < 3ms
//!
//! Run with: cargo bench -p leafveil-field --bench field_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use leafveil_field::{CellVisual, FlickerColor, FlickerField, noise::noise2};

fn blank(len: usize) -> Vec<CellVisual> {
    vec![
        CellVisual {
            color: FlickerColor::Dark,
            opacity: 0.0,
            active: false,
        };
        len
    ]
}

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("flicker_field/noise");

    group.bench_function("noise2_center", |b| {
        b.iter(|| black_box(noise2(black_box(1.0), black_box(1.0))))
    });

    group.bench_function("noise2_varying", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.02;
            black_box(noise2(black_box(x), black_box(x * 0.7)))
        })
    });

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("flicker_field/construction");

    for (w, h) in [(40u32, 12u32), (100, 100), (240, 80)] {
        let label = format!("{w}x{h}");
        group.bench_function(&label, |b| {
            b.iter(|| {
                black_box(FlickerField::seeded(
                    black_box(w),
                    black_box(h),
                    w as f64 / 2.0,
                    h as f64 / 2.0,
                    7,
                ))
            })
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("flicker_field/tick");

    for (w, h) in [(80u32, 24u32), (120, 40), (240, 80)] {
        let size = w as usize * h as usize;
        let label = format!("{w}x{h}");

        group.throughput(criterion::Throughput::Elements(size as u64));
        group.bench_function(&label, |b| {
            let mut field = FlickerField::seeded(w, h, w as f64 / 2.0, h as f64 / 2.0, 7);
            let mut out = blank(size);
            let mut t = 0.0f64;
            b.iter(|| {
                t += 1_000.0 / 60.0;
                field.render_into(black_box(t), &mut out);
                black_box(&out);
            })
        });
    }

    group.finish();
}

fn bench_single_cell_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("flicker_field/cell_state");

    group.bench_function("interior_cell", |b| {
        let mut field = FlickerField::seeded(100, 100, 50.0, 50.0, 7);
        let mut t = 0.0f64;
        b.iter(|| {
            t += 1_000.0 / 60.0;
            black_box(field.cell_state(black_box(50), black_box(50), black_box(t)))
        })
    });

    group.bench_function("border_cell", |b| {
        let mut field = FlickerField::seeded(100, 100, 50.0, 50.0, 7);
        let mut t = 0.0f64;
        b.iter(|| {
            t += 1_000.0 / 60.0;
            black_box(field.cell_state(black_box(0), black_box(0), black_box(t)))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_noise,
    bench_construction,
    bench_tick,
    bench_single_cell_query,
);
criterion_main!(benches);
