//! # Spiral Morphology
//!
//! Exponential core, logarithmic arms and an optional bar.
//!
//! ```text
//!   θk   = 2πk / N + rotation · ln(nd + 0.1)
//!   arm  = max_k exp(-(Δθk · distance)² / 2σ²)
//!   I    = (core + arm + bar) · (1 - nd)² · (0.3 + 0.7 · noise)
//! ```

use std::f64::consts::TAU;

use galaxia_procedural::NoiseSource;
use galaxia_shared::SpiralParameters;

use crate::geometry::{gaussian, normalize_angle, radial_falloff, Geometry};

/// Spiral galaxy evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct SpiralMorphology {
    geometry: Geometry,
    core_size: f64,
    arm_width: f64,
    arm_rotation: f64,
    arm_offsets: Vec<f64>,
    bar_half_length: f64,
}

impl SpiralMorphology {
    /// Creates the evaluator. Arm base angles are computed once here.
    #[must_use]
    pub fn new(geometry: Geometry, core_size: f64, params: &SpiralParameters) -> Self {
        let arms = params.number_of_arms.max(1);
        let arm_offsets = (0..arms)
            .map(|k| TAU * f64::from(k) / f64::from(arms))
            .collect();
        Self {
            geometry,
            core_size,
            arm_width: params.arm_width,
            arm_rotation: params.arm_rotation,
            arm_offsets,
            bar_half_length: params.bar_length.max(0.0) * geometry.radius,
        }
    }

    /// Intensity at a pixel, in [0, 1].
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        let Some(p) = self.geometry.locate(x, y) else {
            return 0.0;
        };
        let nd = p.normalized;

        let core = if nd < self.core_size {
            2.0 * (-3.0 * nd / self.core_size).exp()
        } else {
            0.0
        };

        let angle = p.dy.atan2(p.dx);
        let winding = self.arm_rotation * (nd + 0.1).ln();
        let arm = self
            .arm_offsets
            .iter()
            .map(|offset| {
                let delta = normalize_angle(angle - (offset + winding));
                gaussian(delta * p.distance, self.arm_width)
            })
            .fold(0.0, f64::max);

        let bar = if self.bar_half_length > 0.0 {
            let along = p.dx / (0.5 * self.bar_half_length);
            let across = p.dy / self.arm_width;
            (-0.5 * (along * along + across * across)).exp()
        } else {
            0.0
        };

        let modulation = 0.3 + 0.7 * noise.sample(x, y);
        ((core + arm + bar) * radial_falloff(nd, 2.0) * modulation).clamp(0.0, 1.0)
    }

    /// Number of arms.
    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.arm_offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxia_procedural::NormalizedNoiseGrid;
    use galaxia_shared::StructuralParameters;

    fn flat(size: usize) -> NoiseSource {
        NormalizedNoiseGrid::constant(size, size, 1.0).unwrap().into()
    }

    fn spiral(params: SpiralParameters) -> SpiralMorphology {
        let structural = StructuralParameters::classic_spiral().with_size(128, 128);
        let geometry = Geometry {
            radius: 60.0,
            ..Geometry::new(&structural)
        };
        SpiralMorphology::new(geometry, 0.2, &params)
    }

    #[test]
    fn test_core_is_brightest() {
        let morphology = spiral(SpiralParameters::default());
        let noise = flat(128);
        assert_eq!(morphology.intensity(64, 64, &noise), 1.0);
        assert!(morphology.intensity(64, 64, &noise) >= morphology.intensity(100, 64, &noise));
    }

    #[test]
    fn test_zero_outside_radius() {
        let morphology = spiral(SpiralParameters::default());
        let noise = flat(128);
        assert_eq!(morphology.intensity(0, 0, &noise), 0.0);
        assert_eq!(morphology.intensity(127, 64, &noise), 0.0);
    }

    #[test]
    fn test_bar_brightens_axis() {
        let plain = spiral(SpiralParameters {
            arm_width: 4.0,
            ..SpiralParameters::default()
        });
        let barred = spiral(SpiralParameters {
            arm_width: 4.0,
            bar_length: 0.4,
            ..SpiralParameters::default()
        });
        let noise = flat(128);
        assert!(barred.intensity(80, 64, &noise) > plain.intensity(80, 64, &noise));
    }

    #[test]
    fn test_arm_count_clamped_to_one() {
        let morphology = spiral(SpiralParameters {
            number_of_arms: 0,
            ..SpiralParameters::default()
        });
        assert_eq!(morphology.arm_count(), 1);
    }
}
