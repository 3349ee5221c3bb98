//! Benchmark for noise generation performance.
//!
//! Run with: cargo bench --package galaxia_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use galaxia_procedural::{FieldSettings, MultiLayerNoise, NoiseField, NoiseSeed, SimplexNoise};
use galaxia_shared::{FractalKind, MultiLayerParameters, NoiseParameters};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = SimplexNoise::new(NoiseSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_fractals(c: &mut Criterion) {
    let noise = SimplexNoise::new(NoiseSeed::new(42));

    c.bench_function("fbm_6_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.fbm(black_box(x), black_box(x * 0.7), 6, 0.5, 2.0))
        });
    });

    c.bench_function("ridged_4_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.ridged(black_box(x), black_box(x * 0.7), 4, 0.5, 2.0))
        });
    });
}

fn benchmark_field_512(c: &mut Criterion) {
    let settings = FieldSettings::from_parameters(&NoiseParameters::default());

    let mut group = c.benchmark_group("field_512x512");
    group.throughput(Throughput::Elements(512 * 512));
    group.sample_size(10);

    group.bench_function("fbm_generate", |b| {
        b.iter(|| black_box(NoiseField::generate(NoiseSeed::new(42), 512, 512, settings)))
    });

    let ridged = FieldSettings {
        fractal: FractalKind::Ridged,
        ..settings
    };
    group.bench_function("ridged_generate", |b| {
        b.iter(|| black_box(NoiseField::generate(NoiseSeed::new(42), 512, 512, ridged)))
    });

    let layers = MultiLayerParameters {
        enabled: true,
        ..MultiLayerParameters::default()
    };
    group.bench_function("multi_layer_generate", |b| {
        b.iter(|| {
            black_box(MultiLayerNoise::build(NoiseSeed::new(42), 512, 512, settings, &layers))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_fractals,
    benchmark_field_512
);
criterion_main!(benches);
