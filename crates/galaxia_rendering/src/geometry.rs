//! Radial geometry shared by every morphology.

use std::f64::consts::{PI, TAU};

use galaxia_shared::StructuralParameters;

/// Image center and galaxy radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Center x, `width / 2`.
    pub cx: f64,
    /// Center y, `height / 2`.
    pub cy: f64,
    /// Galaxy radius in pixels.
    pub radius: f64,
}

/// A pixel relative to the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polar {
    /// Offset from center along x.
    pub dx: f64,
    /// Offset from center along y.
    pub dy: f64,
    /// Euclidean distance from center.
    pub distance: f64,
    /// `distance / radius`, at most 1.
    pub normalized: f64,
}

impl Geometry {
    /// Geometry for a parameter set.
    #[must_use]
    pub fn new(params: &StructuralParameters) -> Self {
        let (cx, cy) = params.center();
        Self {
            cx,
            cy,
            radius: params.galaxy_radius,
        }
    }

    /// Locates a pixel. `None` outside the galaxy (`normalized > 1`).
    #[inline]
    #[must_use]
    pub fn locate(&self, x: usize, y: usize) -> Option<Polar> {
        let dx = x as f64 - self.cx;
        let dy = y as f64 - self.cy;
        let distance = dx.hypot(dy);
        let normalized = distance / self.radius;
        if normalized > 1.0 || normalized.is_nan() {
            return None;
        }
        Some(Polar {
            dx,
            dy,
            distance,
            normalized,
        })
    }
}

/// `(1 - nd)^p`.
#[inline]
#[must_use]
pub fn radial_falloff(normalized: f64, power: f64) -> f64 {
    (1.0 - normalized).max(0.0).powf(power)
}

/// Unnormalized Gaussian `exp(-d² / 2σ²)`.
#[inline]
#[must_use]
pub fn gaussian(distance: f64, sigma: f64) -> f64 {
    (-(distance * distance) / (2.0 * sigma * sigma)).exp()
}

/// Wraps an angle into [-π, π].
#[inline]
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped < -PI { wrapped + TAU } else { wrapped }
}

/// Rotates `(dx, dy)` by `-angle_degrees`.
#[inline]
#[must_use]
pub fn rotate(dx: f64, dy: f64, angle_degrees: f64) -> (f64, f64) {
    let (sin, cos) = (-angle_degrees.to_radians()).sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_respects_radius() {
        let params = StructuralParameters::classic_spiral().with_size(100, 100);
        let geometry = Geometry {
            radius: 10.0,
            ..Geometry::new(&params)
        };
        assert!(geometry.locate(50, 50).is_some());
        assert!(geometry.locate(60, 50).is_some());
        assert!(geometry.locate(61, 50).is_none());
    }

    #[test]
    fn test_normalize_angle_range() {
        for i in -40..40 {
            let a = normalize_angle(f64::from(i) * 0.77);
            assert!((-PI..=PI).contains(&a));
        }
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (x, y) = rotate(1.0, 0.0, 90.0);
        assert!(x.abs() < 1e-12);
        assert!((y + 1.0).abs() < 1e-12);
    }
}
