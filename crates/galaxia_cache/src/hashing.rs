//! # Configuration Hashing
//!
//! Content addresses for parameter sets, stable across processes and
//! platforms.
//!
//! ## Scheme
//!
//! - SipHash-2-4 with fixed keys, 128-bit output
//! - Fields are written little-endian in a fixed order, prefixed by a
//!   domain byte
//! - Floats are written as IEEE-754 bits (`-0.0` folded into `0.0`)
//! - Only the active morphology's parameters exist, so only they count
//! - Layer settings count only while multi-layer noise is enabled
//!
//! The structural hash keys the intensity cache. The configuration hash
//! (structural + cosmetic) identifies a finished creation.

use std::fmt;
use std::hash::Hasher;

use siphasher::sip128::{Hasher128, SipHasher24};

use galaxia_shared::{
    ColorScheme, CosmeticParameters, LayerParameters, MorphologyParameters, NoiseParameters,
    StructuralParameters,
};

/// Hash keys. Changing these invalidates every stored hash.
const KEY_0: u64 = 0x6761_6c61_7869_6130;
const KEY_1: u64 = 0x7374_7275_6374_7572;

const DOMAIN_STRUCTURAL: u8 = b'S';
const DOMAIN_COSMETIC: u8 = b'C';
const DOMAIN_CONFIG: u8 = b'F';

macro_rules! hash_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u128);

        impl $name {
            /// Wraps a raw hash value.
            #[must_use]
            pub const fn from_raw(raw: u128) -> Self {
                Self(raw)
            }

            /// The raw 128-bit value.
            #[must_use]
            pub const fn value(self) -> u128 {
                self.0
            }

            /// 32 lowercase hex digits.
            #[must_use]
            pub fn to_hex(self) -> String {
                format!("{:032x}", self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:032x}", self.0)
            }
        }
    };
}

hash_newtype!(
    /// Hash of everything that shapes the intensity field.
    StructuralHash
);
hash_newtype!(
    /// Hash of colors and post-processing.
    CosmeticHash
);
hash_newtype!(
    /// Hash of a complete configuration.
    ConfigHash
);

/// Field writer over a keyed SipHasher.
struct FieldHasher {
    inner: SipHasher24,
}

impl FieldHasher {
    fn new(domain: u8) -> Self {
        let mut inner = SipHasher24::new_with_keys(KEY_0, KEY_1);
        inner.write(&[domain]);
        Self { inner }
    }

    fn u8(&mut self, v: u8) {
        self.inner.write(&[v]);
    }

    fn u32(&mut self, v: u32) {
        self.inner.write(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.inner.write(&v.to_le_bytes());
    }

    fn u128(&mut self, v: u128) {
        self.inner.write(&v.to_le_bytes());
    }

    fn bool(&mut self, v: bool) {
        self.u8(u8::from(v));
    }

    fn f64(&mut self, v: f64) {
        let canonical = if v == 0.0 { 0.0 } else { v };
        self.u64(canonical.to_bits());
    }

    fn finish(&self) -> u128 {
        self.inner.finish128().as_u128()
    }
}

fn write_noise(h: &mut FieldHasher, noise: &NoiseParameters) {
    h.u32(noise.octaves);
    h.f64(noise.persistence);
    h.f64(noise.lacunarity);
    h.f64(noise.scale);
    h.u8(noise.fractal.tag());
}

fn write_layer(h: &mut FieldHasher, layer: LayerParameters) {
    h.f64(layer.scale);
    h.f64(layer.weight);
}

fn write_morphology(h: &mut FieldHasher, morphology: &MorphologyParameters) {
    h.u8(morphology.kind() as u8);
    match morphology {
        MorphologyParameters::Spiral(p) => {
            h.u32(p.number_of_arms);
            h.f64(p.arm_width);
            h.f64(p.arm_rotation);
            h.f64(p.bar_length);
        }
        MorphologyParameters::Elliptical(p) => {
            h.f64(p.sersic_index);
            h.f64(p.axis_ratio);
            h.f64(p.orientation_angle);
        }
        MorphologyParameters::Ring(p) => {
            h.f64(p.ring_radius);
            h.f64(p.ring_width);
            h.f64(p.ring_intensity);
            h.f64(p.core_to_ring_ratio);
        }
        MorphologyParameters::Irregular(p) => {
            h.f64(p.irregularity);
            h.u32(p.clump_count);
            h.f64(p.clump_size);
        }
        MorphologyParameters::VoronoiCluster(p) => {
            h.u32(p.cluster_count);
            h.f64(p.cluster_size);
            h.f64(p.cluster_concentration);
        }
        MorphologyParameters::Lenticular(p) => {
            h.f64(p.sersic_index);
            h.f64(p.axis_ratio);
            h.f64(p.orientation_angle);
            h.f64(p.disk_contribution);
        }
    }
}

/// Hash of the structural parameters.
#[must_use]
pub fn structural_hash(params: &StructuralParameters) -> StructuralHash {
    let mut h = FieldHasher::new(DOMAIN_STRUCTURAL);
    h.u32(params.width);
    h.u32(params.height);
    h.u64(params.seed);
    h.f64(params.core_size);
    h.f64(params.galaxy_radius);
    h.f64(params.warp_strength);
    write_noise(&mut h, &params.noise);

    let layers = &params.multi_layer;
    h.bool(layers.enabled);
    if layers.enabled {
        write_layer(&mut h, layers.macro_layer);
        write_layer(&mut h, layers.meso_layer);
        write_layer(&mut h, layers.micro_layer);
    }

    write_morphology(&mut h, &params.morphology);
    StructuralHash(h.finish())
}

/// Hash of the cosmetic parameters.
#[must_use]
pub fn cosmetic_hash(params: &CosmeticParameters) -> CosmeticHash {
    let mut h = FieldHasher::new(DOMAIN_COSMETIC);
    match &params.colors {
        ColorScheme::Palette { name } => {
            h.u8(0);
            h.u8(name.tag());
        }
        ColorScheme::FourZone(set) => {
            h.u8(1);
            for c in [set.space, set.outer, set.arm, set.core] {
                h.u8(c.r);
                h.u8(c.g);
                h.u8(c.b);
            }
        }
        ColorScheme::Gradient { stops } => {
            h.u8(2);
            h.u64(stops.len() as u64);
            for stop in stops {
                h.f64(stop.position);
                h.u8(stop.color.r);
                h.u8(stop.color.g);
                h.u8(stop.color.b);
            }
        }
    }

    let bloom = &params.bloom;
    h.bool(bloom.enabled);
    h.u32(bloom.radius);
    h.f64(bloom.intensity);
    h.f64(bloom.threshold);

    let stars = &params.star_field;
    h.bool(stars.enabled);
    h.f64(stars.density);
    h.u32(stars.max_size);
    h.bool(stars.diffraction_spikes);
    h.u32(stars.spike_count);

    CosmeticHash(h.finish())
}

/// Hash of a full configuration.
#[must_use]
pub fn config_hash(structural: &StructuralParameters, cosmetic: &CosmeticParameters) -> ConfigHash {
    let mut h = FieldHasher::new(DOMAIN_CONFIG);
    h.u128(structural_hash(structural).value());
    h.u128(cosmetic_hash(cosmetic).value());
    ConfigHash(h.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxia_shared::{MorphologyKind, Palette, SpiralParameters};

    #[test]
    fn test_hash_is_stable_within_process() {
        let params = StructuralParameters::classic_spiral();
        assert_eq!(structural_hash(&params), structural_hash(&StructuralParameters::classic_spiral()));
        assert_eq!(structural_hash(&params).to_hex().len(), 32);
    }

    #[test]
    fn test_every_structural_field_matters() {
        let base = StructuralParameters::classic_spiral();
        let h = structural_hash(&base);

        let mut variants = vec![
            base.with_seed(43),
            base.with_size(513, 512),
            base.with_size(512, 511),
        ];
        let mut p = base;
        p.core_size = 0.19;
        variants.push(p);
        let mut p = base;
        p.galaxy_radius = 231.0;
        variants.push(p);
        let mut p = base;
        p.warp_strength = 1.0;
        variants.push(p);
        let mut p = base;
        p.noise.octaves += 1;
        variants.push(p);
        let mut p = base;
        p.multi_layer.enabled = true;
        variants.push(p);
        variants.push(base.with_morphology(MorphologyParameters::Spiral(SpiralParameters {
            arm_width: 29.0,
            ..SpiralParameters::default()
        })));

        for variant in variants {
            assert_ne!(structural_hash(&variant), h, "{variant:?}");
        }
    }

    #[test]
    fn test_kinds_never_collide_on_defaults() {
        let mut seen = std::collections::HashSet::new();
        for kind in MorphologyKind::ALL {
            let params = StructuralParameters::classic_spiral()
                .with_morphology(MorphologyParameters::defaults_for(kind));
            assert!(seen.insert(structural_hash(&params)));
        }
    }

    #[test]
    fn test_disabled_layers_ignored() {
        let mut a = StructuralParameters::classic_spiral();
        a.multi_layer.enabled = false;
        let mut b = a;
        b.multi_layer.meso_layer.weight += 0.25;
        b.multi_layer.micro_layer.scale *= 2.0;
        assert_eq!(structural_hash(&a), structural_hash(&b));

        a.multi_layer.enabled = true;
        b.multi_layer.enabled = true;
        assert_ne!(structural_hash(&a), structural_hash(&b));
    }

    #[test]
    fn test_negative_zero_folds() {
        let mut a = StructuralParameters::classic_spiral();
        a.warp_strength = 0.0;
        let mut b = a;
        b.warp_strength = -0.0;
        assert_eq!(structural_hash(&a), structural_hash(&b));
    }

    #[test]
    fn test_cosmetic_changes_only_config_hash() {
        let structural = StructuralParameters::classic_spiral();
        let a = CosmeticParameters::default();
        let b = CosmeticParameters {
            colors: ColorScheme::Palette {
                name: Palette::Ember,
            },
            ..CosmeticParameters::default()
        };
        assert_ne!(cosmetic_hash(&a), cosmetic_hash(&b));
        assert_ne!(config_hash(&structural, &a), config_hash(&structural, &b));
    }
}
