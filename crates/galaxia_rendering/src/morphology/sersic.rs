//! # Sérsic Profile
//!
//! `I(r) = exp(-bn · ((r / re)^(1/n) - 1))`, normalized so `I(re) = 1`.
//! `bn` uses the Ciotti & Bertin (1999) series, accurate for `n > 0.36`.

use crate::error::{RenderError, RenderResult};

/// A validated Sérsic surface-brightness law.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SersicProfile {
    index: f64,
    effective_radius: f64,
    bn: f64,
}

impl SersicProfile {
    /// Creates a profile.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSersic`] unless `n > 0` and `re > 0`.
    pub fn new(index: f64, effective_radius: f64) -> RenderResult<Self> {
        if !(index > 0.0) || !(effective_radius > 0.0) {
            return Err(RenderError::InvalidSersic {
                index,
                effective_radius,
            });
        }
        Ok(Self {
            index,
            effective_radius,
            bn: ciotti_bn(index),
        })
    }

    /// Surface brightness at radius `r` (pixels).
    #[inline]
    #[must_use]
    pub fn intensity(&self, r: f64) -> f64 {
        let scaled = (r.max(0.0) / self.effective_radius).powf(1.0 / self.index);
        (-self.bn * (scaled - 1.0)).exp()
    }

    /// The Sérsic index.
    #[must_use]
    pub const fn index(&self) -> f64 {
        self.index
    }

    /// The effective (half-light) radius.
    #[must_use]
    pub const fn effective_radius(&self) -> f64 {
        self.effective_radius
    }
}

/// `bn ≈ 2n - 1/3 + 4/(405n) + 46/(25515n²)`.
#[inline]
#[must_use]
pub fn ciotti_bn(n: f64) -> f64 {
    2.0 * n - 1.0 / 3.0 + 4.0 / (405.0 * n) + 46.0 / (25515.0 * n * n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_brightness_at_effective_radius() {
        let profile = SersicProfile::new(4.0, 100.0).unwrap();
        assert!((profile.intensity(100.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotone_decreasing() {
        for n in [0.5, 1.0, 2.5, 4.0, 8.0] {
            let profile = SersicProfile::new(n, 50.0).unwrap();
            let mut previous = f64::INFINITY;
            for r in 0..300 {
                let value = profile.intensity(f64::from(r));
                assert!(value <= previous, "n={n} r={r}");
                previous = value;
            }
        }
    }

    #[test]
    fn test_de_vaucouleurs_bn() {
        assert!((ciotti_bn(4.0) - 7.669).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(SersicProfile::new(0.0, 10.0).is_err());
        assert!(SersicProfile::new(-1.0, 10.0).is_err());
        assert!(SersicProfile::new(4.0, 0.0).is_err());
        assert!(SersicProfile::new(f64::NAN, 10.0).is_err());
    }
}
