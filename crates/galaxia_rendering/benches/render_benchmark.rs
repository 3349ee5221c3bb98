//! Rendering benchmarks.
//!
//! Run with: `cargo bench -p galaxia_rendering`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use galaxia_rendering::{Bloom, RenderOrchestrator};
use galaxia_shared::{BloomParameters, CosmeticParameters, MorphologyKind, StructuralParameters};

fn bench_intensity_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("intensity_field_256");
    for kind in MorphologyKind::ALL {
        let params = StructuralParameters::preset(kind).with_size(256, 256);
        let orchestrator = RenderOrchestrator::new(&params).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(kind), &orchestrator, |b, o| {
            b.iter(|| black_box(o.compute_intensity_field().unwrap()));
        });
    }
    group.finish();
}

fn bench_colorize(c: &mut Criterion) {
    let params = StructuralParameters::classic_spiral().with_size(256, 256);
    let field = RenderOrchestrator::new(&params)
        .unwrap()
        .compute_intensity_field()
        .unwrap();
    let cosmetic = CosmeticParameters::default();

    c.bench_function("colorize_256_with_post", |b| {
        b.iter(|| black_box(RenderOrchestrator::colorize(&field, &cosmetic, 42).unwrap()));
    });
}

fn bench_bloom(c: &mut Criterion) {
    let params = StructuralParameters::classic_spiral().with_size(256, 256);
    let image = RenderOrchestrator::new(&params)
        .unwrap()
        .render(&CosmeticParameters::plain(Default::default()))
        .unwrap();
    let bloom = Bloom::new(&BloomParameters {
        radius: 12,
        ..BloomParameters::default()
    });

    c.bench_function("bloom_radius_12", |b| {
        b.iter(|| {
            let mut copy = image.clone();
            bloom.apply(&mut copy);
            black_box(copy)
        });
    });
}

criterion_group!(benches, bench_intensity_fields, bench_colorize, bench_bloom);
criterion_main!(benches);
