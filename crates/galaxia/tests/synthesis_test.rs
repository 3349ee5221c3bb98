//! # Synthesis Integration Tests
//!
//! End-to-end behavior of the public entry point.

use std::sync::Arc;
use std::thread;

use galaxia::{
    ColorScheme, CosmeticParameters, FourColorSet, MorphologyKind, Palette,
    StructuralParameters, SynthesisConfig, SynthesisError, Synthesizer, SynthesizerConfig,
};

fn small(kind: MorphologyKind) -> StructuralParameters {
    StructuralParameters::preset(kind).with_size(72, 64)
}

/// Test: identical requests produce byte-identical pixels, even across
/// synthesizers (no hidden state).
#[test]
fn test_byte_identical_across_instances() {
    for kind in MorphologyKind::ALL {
        let params = small(kind).with_seed(31337);
        let cosmetic = CosmeticParameters::default();
        let a = Synthesizer::default().synthesize(&params, &cosmetic).unwrap();
        let b = Synthesizer::default().synthesize(&params, &cosmetic).unwrap();
        assert_eq!(a.as_raw(), b.as_raw(), "{kind}");
    }
}

/// Test: a cache hit renders exactly like a fresh computation.
#[test]
fn test_cached_render_equals_fresh_render() {
    let synth = Synthesizer::default();
    let params = small(MorphologyKind::Irregular);
    let cosmetic = CosmeticParameters::default();

    let fresh = synth.synthesize(&params, &cosmetic).unwrap();
    let cached = synth.synthesize(&params, &cosmetic).unwrap();
    assert_eq!(fresh, cached);
    assert_eq!(synth.cache_stats().hits, 1);
}

/// Test: pixels far outside the galaxy show the background color.
#[test]
fn test_corners_are_background() {
    let colors = FourColorSet::default();
    let cosmetic = CosmeticParameters::plain(ColorScheme::FourZone(colors));
    let mut params = small(MorphologyKind::Elliptical);
    params.galaxy_radius = 20.0;
    params.warp_strength = 0.0;

    let image = Synthesizer::default().synthesize(&params, &cosmetic).unwrap();
    let corner = image.get_pixel(0, 0);
    assert_eq!([corner[0], corner[1], corner[2]], [colors.space.r, colors.space.g, colors.space.b]);
}

/// Test: concurrent requests for one structure share a single field.
#[test]
fn test_concurrent_synthesis_single_computation() {
    let synth = Arc::new(Synthesizer::new(SynthesizerConfig { cache_capacity: 4 }));
    let params = small(MorphologyKind::Spiral);

    let handles: Vec<_> = Palette::ALL
        .into_iter()
        .map(|palette| {
            let synth = Arc::clone(&synth);
            thread::spawn(move || {
                let cosmetic = CosmeticParameters::plain(ColorScheme::Palette { name: palette });
                synth.synthesize(&params, &cosmetic).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().dimensions(), (72, 64));
    }
    assert_eq!(synth.cache_stats().computations, 1);
}

/// Test: a TOML request renders the same as the equivalent Rust values.
#[test]
fn test_toml_request_matches_code() {
    let config = SynthesisConfig::from_toml_str(
        r#"
        [structural]
        width = 72
        height = 64
        seed = 5

        [structural.morphology]
        kind = "RING"

        [cosmetic.colors]
        type = "palette"
        name = "ice"
        "#,
    )
    .unwrap();

    let mut params = StructuralParameters::default().with_size(72, 64).with_seed(5);
    params.morphology = galaxia::MorphologyParameters::defaults_for(MorphologyKind::Ring);
    let cosmetic = CosmeticParameters {
        colors: ColorScheme::Palette { name: Palette::Ice },
        ..CosmeticParameters::default()
    };
    assert_eq!(config.structural, params);

    let synth = Synthesizer::default();
    let from_toml = synth.synthesize(&config.structural, &config.cosmetic).unwrap();
    let from_code = synth.synthesize(&params, &cosmetic).unwrap();
    assert_eq!(from_toml, from_code);
}

/// Test: a gradient with one stop is rejected before any rendering.
#[test]
fn test_bad_gradient_rejected() {
    let cosmetic = CosmeticParameters::plain(ColorScheme::Gradient {
        stops: vec![galaxia::ColorStop::new(0.0, galaxia::Rgb::BLACK)],
    });
    let synth = Synthesizer::default();
    let err = synth
        .synthesize(&small(MorphologyKind::Spiral), &cosmetic)
        .unwrap_err();
    assert!(matches!(err, SynthesisError::Parameters(_)));
    assert_eq!(synth.cache_stats().misses, 0);
}

/// Test: texture mode renders noise, not a galaxy.
#[test]
fn test_texture_mode() {
    let synth = Synthesizer::default();
    let params = small(MorphologyKind::Spiral);
    let cosmetic = CosmeticParameters::default();
    let texture = synth.synthesize_texture(&params, &cosmetic).unwrap();
    let galaxy = synth.synthesize(&params, &cosmetic).unwrap();
    assert_eq!(texture.dimensions(), galaxy.dimensions());
    assert_ne!(texture, galaxy);
}
