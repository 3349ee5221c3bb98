//! # Irregular Morphology
//!
//! A faint core plus star-forming clumps, broken up by noise.

use galaxia_procedural::{NoiseSeed, NoiseSource};
use galaxia_shared::IrregularParameters;

use crate::geometry::{gaussian, radial_falloff, Geometry};
use crate::morphology::blobs::{BlobSet, Scatter};

/// Sub-seed purpose for clump placement.
pub const CLUMP_PURPOSE: u64 = 0x434c_554d_5053;

/// Clumps stay inside this fraction of the galaxy radius.
const PLACEMENT_FRACTION: f64 = 0.8;

/// Irregular galaxy evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct IrregularMorphology {
    geometry: Geometry,
    irregularity: f64,
    clumps: BlobSet,
}

impl IrregularMorphology {
    /// Creates the evaluator and places every clump.
    #[must_use]
    pub fn new(geometry: Geometry, seed: NoiseSeed, params: &IrregularParameters) -> Self {
        let reach = PLACEMENT_FRACTION * geometry.radius;
        let clump_size = params.clump_size;
        let scatter = Scatter {
            radius: move |u: f64| reach * u.sqrt(),
            size: move |u: f64| clump_size * (0.5 + u),
            brightness: |u: f64| 0.5 + 0.5 * u,
        };
        let clumps = BlobSet::scatter(seed, CLUMP_PURPOSE, params.clump_count, &geometry, &scatter);
        Self {
            geometry,
            irregularity: params.irregularity,
            clumps,
        }
    }

    /// Intensity at a pixel, in [0, 1].
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        let Some(p) = self.geometry.locate(x, y) else {
            return 0.0;
        };
        let core = 0.3 * gaussian(p.normalized, 0.15);
        let clumps = self.clumps.coverage(x as f64, y as f64);

        let modulation = self.irregularity * noise.sample(x, y) + (1.0 - self.irregularity);
        ((core + clumps) * modulation * radial_falloff(p.normalized, 1.5)).clamp(0.0, 1.0)
    }

    /// The placed clumps.
    #[must_use]
    pub const fn clumps(&self) -> &BlobSet {
        &self.clumps
    }
}
