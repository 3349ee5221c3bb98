//! # Domain Warp
//!
//! Perturbs sampling coordinates with two independent noise fields
//! before the intensity is evaluated, giving organic, filamentary
//! distortion.
//!
//! ```text
//!   x' = clamp(round(x + (nx(x, y) - 0.5) * strength), 0, width - 1)
//!   y' = clamp(round(y + (ny(x, y) - 0.5) * strength), 0, height - 1)
//! ```

use crate::error::NoiseResult;
use crate::field::{check_dimensions, FieldSettings, NoiseField, NormalizedNoiseGrid};
use crate::noise::NoiseSeed;
use galaxia_shared::FractalKind;

/// Seed offset of the horizontal displacement field.
pub const WARP_X_SEED_OFFSET: u64 = 5000;
/// Seed offset of the vertical displacement field.
pub const WARP_Y_SEED_OFFSET: u64 = 6000;
/// Octaves of the displacement fields.
pub const WARP_OCTAVES: u32 = 3;

/// Coordinate warp, or the identity when disabled.
#[derive(Clone, Debug, PartialEq)]
pub enum DomainWarp {
    /// `warp(x, y) == (x, y)`. No noise is ever built.
    Identity,
    /// Noise-driven displacement.
    Noise {
        /// Horizontal displacement field.
        dx: NormalizedNoiseGrid,
        /// Vertical displacement field.
        dy: NormalizedNoiseGrid,
        /// Peak-to-peak displacement in pixels.
        strength: f64,
    },
}

impl DomainWarp {
    /// Builds the warp for an image.
    ///
    /// `strength <= 0` short-circuits to [`DomainWarp::Identity`] without
    /// evaluating any noise. Otherwise both displacement fields are built
    /// and fully normalized before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the image has a zero dimension.
    pub fn new(seed: NoiseSeed, width: usize, height: usize, strength: f64) -> NoiseResult<Self> {
        check_dimensions(width, height)?;
        if !(strength > 0.0) {
            return Ok(Self::Identity);
        }

        let settings = FieldSettings {
            octaves: WARP_OCTAVES,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: Self::scale_for(width, height),
            fractal: FractalKind::Fbm,
        };
        let dx = NoiseField::generate(seed.offset(WARP_X_SEED_OFFSET), width, height, settings)?;
        let dy = NoiseField::generate(seed.offset(WARP_Y_SEED_OFFSET), width, height, settings)?;
        tracing::debug!(width, height, strength, "built domain warp fields");

        Ok(Self::Noise { dx, dy, strength })
    }

    /// Feature size of the displacement noise: a third of the larger side.
    #[must_use]
    pub fn scale_for(width: usize, height: usize) -> f64 {
        (width.max(height) as f64 / 3.0).max(1.0)
    }

    /// Returns true for the identity warp.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Warped coordinate, rounded and clamped to the image.
    #[inline]
    #[must_use]
    pub fn warp(&self, x: usize, y: usize) -> (usize, usize) {
        match self {
            Self::Identity => (x, y),
            Self::Noise { dx, dy, strength } => {
                let ox = (dx.value(x, y) - 0.5) * strength;
                let oy = (dy.value(x, y) - 0.5) * strength;
                (
                    displace(x, ox, dx.width()),
                    displace(y, oy, dx.height()),
                )
            }
        }
    }
}

#[inline]
fn displace(coord: usize, offset: f64, limit: usize) -> usize {
    let max = (limit - 1) as f64;
    (coord as f64 + offset).round().clamp(0.0, max) as usize
}
