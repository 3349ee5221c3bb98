//! Lenticular galaxies: Sérsic bulge blended with a thin exponential disk.

use galaxia_procedural::NoiseSource;
use galaxia_shared::LenticularParameters;

use crate::error::RenderResult;
use crate::geometry::{radial_falloff, rotate, Geometry};
use crate::morphology::sersic::SersicProfile;

const BULGE_RADIUS_FRACTION: f64 = 0.4;
const DISK_SCALE_FRACTION: f64 = 0.6;

/// Lenticular galaxy evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct LenticularMorphology {
    geometry: Geometry,
    bulge: SersicProfile,
    axis_ratio: f64,
    disk_axis_ratio: f64,
    disk_scale: f64,
    orientation: f64,
    disk_weight: f64,
}

impl LenticularMorphology {
    /// Creates the evaluator.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive Sérsic index or radius.
    pub fn new(geometry: Geometry, params: &LenticularParameters) -> RenderResult<Self> {
        let bulge =
            SersicProfile::new(params.sersic_index, BULGE_RADIUS_FRACTION * geometry.radius)?;
        Ok(Self {
            geometry,
            bulge,
            axis_ratio: params.axis_ratio,
            disk_axis_ratio: (params.axis_ratio * 0.5).min(1.0),
            disk_scale: DISK_SCALE_FRACTION * geometry.radius,
            orientation: params.orientation_angle,
            disk_weight: params.disk_contribution,
        })
    }

    /// Intensity at a pixel, in [0, 1].
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        let Some(p) = self.geometry.locate(x, y) else {
            return 0.0;
        };
        let (rx, ry) = rotate(p.dx, p.dy, self.orientation);

        let bulge = self.bulge.intensity(rx.hypot(ry / self.axis_ratio));
        let disk = (-rx.hypot(ry / self.disk_axis_ratio) / self.disk_scale).exp();
        let combined = (1.0 - self.disk_weight) * 0.5 * bulge + self.disk_weight * disk;

        let modulation = 0.85 + 0.15 * noise.sample(x, y);
        (combined * radial_falloff(p.normalized, 1.5) * modulation).clamp(0.0, 1.0)
    }
}
