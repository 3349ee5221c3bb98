//! Elliptical galaxies: a rotated, flattened Sérsic profile.

use galaxia_procedural::NoiseSource;
use galaxia_shared::EllipticalParameters;

use crate::error::RenderResult;
use crate::geometry::{radial_falloff, rotate, Geometry};
use crate::morphology::sersic::SersicProfile;

/// Effective radius as a fraction of the galaxy radius.
pub const EFFECTIVE_RADIUS_FRACTION: f64 = 0.5;

/// Elliptical galaxy evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct EllipticalMorphology {
    geometry: Geometry,
    profile: SersicProfile,
    axis_ratio: f64,
    orientation: f64,
}

impl EllipticalMorphology {
    /// Creates the evaluator.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive Sérsic index or radius.
    pub fn new(geometry: Geometry, params: &EllipticalParameters) -> RenderResult<Self> {
        let profile = SersicProfile::new(
            params.sersic_index,
            EFFECTIVE_RADIUS_FRACTION * geometry.radius,
        )?;
        Ok(Self {
            geometry,
            profile,
            axis_ratio: params.axis_ratio,
            orientation: params.orientation_angle,
        })
    }

    /// Intensity at a pixel, in [0, 1].
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        let Some(p) = self.geometry.locate(x, y) else {
            return 0.0;
        };
        let (rx, ry) = rotate(p.dx, p.dy, self.orientation);
        let r = rx.hypot(ry / self.axis_ratio);

        let modulation = 0.8 + 0.2 * noise.sample(x, y);
        (0.5 * self.profile.intensity(r) * radial_falloff(p.normalized, 1.5) * modulation)
            .clamp(0.0, 1.0)
    }
}
