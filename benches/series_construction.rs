//! Benchmarks for lap series construction and axis ranges
//!
//! Covers the work repeated on every selection change:
//! - Session filtering for a requested driver subset
//! - Series construction with and without outliers
//! - Axis range computation over a built series
//!
//! Platform: Cross-platform (synthetic sessions, CI-safe)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use paddock::filter::filter_session;
use paddock::series::{DuplicateLapPolicy, SeriesBuilder, axis_range};
use paddock::test_utils::{driver_code, synthetic_session};
use std::hint::black_box;

fn bench_filter(c: &mut Criterion) {
    let record = synthetic_session(20, 70);
    let requested: Vec<String> = (0..4).map(driver_code).collect();

    c.bench_function("filter_four_of_twenty", |b| {
        b.iter(|| black_box(filter_session(black_box(record.clone()), &requested)))
    });
}

fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_construction");

    for drivers in [2usize, 4, 10, 20] {
        let record = synthetic_session(20, 70);
        let selected: Vec<String> = (0..drivers).map(driver_code).collect();
        group.throughput(Throughput::Elements((drivers * 70) as u64));

        group.bench_with_input(BenchmarkId::new("valid_only", drivers), &selected, |b, selected| {
            let builder = SeriesBuilder::new(selected);
            b.iter(|| black_box(builder.build(black_box(&record))))
        });

        group.bench_with_input(BenchmarkId::new("with_outliers_fastest", drivers), &selected, |b, selected| {
            let builder =
                SeriesBuilder::new(selected).include_outliers(true).duplicates(DuplicateLapPolicy::Fastest);
            b.iter(|| black_box(builder.build(black_box(&record))))
        });
    }

    group.finish();
}

fn bench_axis_range(c: &mut Criterion) {
    let record = synthetic_session(20, 70);
    let selected: Vec<String> = (0..20).map(driver_code).collect();
    let series = SeriesBuilder::new(&selected).build(&record);

    c.bench_function("axis_range_twenty_drivers", |b| {
        b.iter(|| black_box(axis_range(black_box(&series), &selected)))
    });
}

criterion_group!(benches, bench_filter, bench_series, bench_axis_range);
criterion_main!(benches);
