//! Benchmarks for anomaly generation and insertion.
//!
//! Run with: cargo bench --bench generation_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use tsag::prelude::*;

/// Create a noisy sine wave for benchmarking.
fn create_synthetic_series(len: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..len)
        .map(|t| (t as f64 * 0.05).sin() + rng.gen::<f64>() * 0.1)
        .collect()
}

fn compound_config() -> CompoundConfig {
    CompoundConfig::new()
        .then(FrequencyShiftConfig::new(1.0 / 3.0))
        .then(AmplitudeShiftConfig::new(1.0 / 3.0))
        .then(RangeShiftConfig::new(0.5))
        .then(PointConfig::new(4.0).with_count(3))
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for len in [64usize, 1024, 16384] {
        let template = Template::new(create_synthetic_series(len)).unwrap();
        group.throughput(Throughput::Elements(len as u64));

        let specs: [(&str, AnomalySpec); 6] = [
            ("point", PointConfig::default().into()),
            ("frequency_shift", FrequencyShiftConfig::default().into()),
            ("amplitude_shift", AmplitudeShiftConfig::default().into()),
            ("range_shift", RangeShiftConfig::default().into()),
            ("noisy", NoisyConfig::default().into()),
            ("compound", compound_config().into()),
        ];

        for (name, spec) in specs {
            group.bench_with_input(BenchmarkId::new(name, len), &len, |b, _| {
                b.iter(|| {
                    // a fresh generator per iteration, otherwise the cache answers
                    let anomaly = spec.clone().build(template.clone()).unwrap();
                    black_box(anomaly.into_generated())
                })
            });
        }
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    let template = Template::new(create_synthetic_series(256)).unwrap();
    let anomaly = CompoundAnomaly::new(template, compound_config()).unwrap();
    anomaly.generate();

    for host_len in [1_000usize, 100_000] {
        let host = create_synthetic_series(host_len);
        group.throughput(Throughput::Elements(host_len as u64));

        group.bench_with_input(BenchmarkId::new("random_index", host_len), &host, |b, host| {
            let mut rng = Seed::new(7).to_rng();
            b.iter(|| black_box(anomaly.insert_labeled(host, None, &mut rng).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_insert);
criterion_main!(benches);
