//! Ring galaxies: a compact core inside a Gaussian annulus.

use galaxia_procedural::NoiseSource;
use galaxia_shared::RingParameters;

use crate::geometry::{gaussian, radial_falloff, Geometry};

/// Ring galaxy evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct RingMorphology {
    geometry: Geometry,
    core_size: f64,
    params: RingParameters,
}

impl RingMorphology {
    /// Creates the evaluator.
    #[must_use]
    pub const fn new(geometry: Geometry, core_size: f64, params: RingParameters) -> Self {
        Self {
            geometry,
            core_size,
            params,
        }
    }

    /// Intensity at a pixel, in [0, 1].
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        let Some(p) = self.geometry.locate(x, y) else {
            return 0.0;
        };
        let core = self.params.core_to_ring_ratio * gaussian(p.normalized, self.core_size);
        let ring = self.params.ring_intensity
            * gaussian(p.distance - self.params.ring_radius, self.params.ring_width);

        let modulation = 0.4 + 0.6 * noise.sample(x, y);
        ((core + ring) * radial_falloff(p.normalized, 1.5) * modulation).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxia_procedural::NormalizedNoiseGrid;
    use galaxia_shared::StructuralParameters;

    #[test]
    fn test_ring_brighter_than_gap() {
        let structural = StructuralParameters::ring().with_size(201, 201);
        let geometry = Geometry {
            radius: 100.0,
            ..Geometry::new(&structural)
        };
        let morphology = RingMorphology::new(
            geometry,
            0.1,
            RingParameters {
                ring_radius: 50.0,
                ring_width: 5.0,
                ring_intensity: 1.0,
                core_to_ring_ratio: 0.7,
            },
        );
        let noise: NoiseSource = NormalizedNoiseGrid::constant(201, 201, 1.0).unwrap().into();

        let gap = morphology.intensity(130, 100, &noise);
        let ring = morphology.intensity(150, 100, &noise);
        let core = morphology.intensity(100, 100, &noise);
        assert!(ring > gap);
        assert!(core > gap);
    }
}
