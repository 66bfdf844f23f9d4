use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tr_autotune::algorithms::RadioAllocator;
use tr_autotune::core::domain::{FrequencySet, Hertz};
use tr_autotune::preprocessing::{AutotunePipeline, FrequencyNormalizer};

/// Every `stride`-th channel of a 12.5 kHz raster starting at 851 MHz.
fn raster_mhz(count: usize, stride: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 851.0125 + (i * stride) as f64 * 0.0125)
        .collect()
}

fn raster_set(count: usize, stride: usize) -> FrequencySet {
    let frequencies = (0..count)
        .map(|i| Hertz::new(851_012_500 + (i * stride) as i64 * 12_500))
        .collect();
    FrequencySet::from_sorted(frequencies).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for count in [10, 100, 1000] {
        let mut raw = raster_mhz(count, 3);
        raw.reverse();
        group.bench_with_input(BenchmarkId::from_parameter(count), &raw, |b, input| {
            b.iter(|| FrequencyNormalizer::normalize(black_box(input)));
        });
    }

    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocate");
    let allocator = RadioAllocator::new(Hertz::new(2_048_000), Hertz::new(12_500)).unwrap();

    // Tight site: everything fits a handful of radios
    let tight = raster_set(40, 2);
    group.bench_with_input(BenchmarkId::new("tight", 40), &tight, |b, set| {
        b.iter(|| allocator.allocate(black_box(set)));
    });

    // Sparse site: channels spread over many windows
    for count in [100, 1000] {
        let sparse = raster_set(count, 97);
        group.bench_with_input(BenchmarkId::new("sparse", count), &sparse, |b, set| {
            b.iter(|| allocator.allocate(black_box(set)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = AutotunePipeline::new();

    let site = raster_mhz(30, 5);
    group.bench_function("typical_site", |b| {
        b.iter(|| pipeline.run(black_box(&site)));
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_allocate, bench_pipeline);
criterion_main!(benches);
