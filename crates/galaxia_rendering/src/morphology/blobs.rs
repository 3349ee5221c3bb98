//! # Seeded Gaussian Blobs
//!
//! Clumps and clusters are placed once, at construction, from a ChaCha8
//! stream derived from the render seed. Pixel evaluation only reads them.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use galaxia_procedural::NoiseSeed;

use crate::geometry::Geometry;

/// Contributions beyond this many sigmas are skipped.
const CUTOFF_SIGMAS: f64 = 4.0;

/// One Gaussian blob in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Center x in pixels.
    pub x: f64,
    /// Center y in pixels.
    pub y: f64,
    /// Gaussian sigma in pixels.
    pub size: f64,
    /// Peak brightness.
    pub brightness: f64,
}

/// How blob attributes are drawn from uniform samples.
pub(crate) struct Scatter<R, S, B> {
    /// Maps `u` to a distance in pixels from the center.
    pub radius: R,
    /// Maps `u` to a sigma in pixels.
    pub size: S,
    /// Maps `u` to a peak brightness.
    pub brightness: B,
}

/// An immutable set of blobs.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobSet {
    blobs: Vec<Blob>,
}

impl BlobSet {
    /// Places `count` blobs around the geometry center.
    ///
    /// Each blob draws angle, radius, size and brightness in that order.
    pub(crate) fn scatter<R, S, B>(
        seed: NoiseSeed,
        purpose: u64,
        count: u32,
        geometry: &Geometry,
        scatter: &Scatter<R, S, B>,
    ) -> Self
    where
        R: Fn(f64) -> f64,
        S: Fn(f64) -> f64,
        B: Fn(f64) -> f64,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(purpose).value());
        let blobs = (0..count)
            .map(|_| {
                let angle = rng.gen::<f64>() * TAU;
                let distance = (scatter.radius)(rng.gen::<f64>());
                let size = (scatter.size)(rng.gen::<f64>());
                let brightness = (scatter.brightness)(rng.gen::<f64>());
                Blob {
                    x: geometry.cx + distance * angle.cos(),
                    y: geometry.cy + distance * angle.sin(),
                    size,
                    brightness,
                }
            })
            .collect();
        Self { blobs }
    }

    /// `min(1, Σ brightness · exp(-d² / 2σ²))` at a pixel.
    #[inline]
    #[must_use]
    pub fn coverage(&self, x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        for blob in &self.blobs {
            let dx = x - blob.x;
            let dy = y - blob.y;
            let d2 = dx * dx + dy * dy;
            let reach = CUTOFF_SIGMAS * blob.size;
            if d2 > reach * reach {
                continue;
            }
            sum += blob.brightness * (-d2 / (2.0 * blob.size * blob.size)).exp();
        }
        sum.min(1.0)
    }

    /// The placed blobs.
    #[must_use]
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry {
            cx: 50.0,
            cy: 50.0,
            radius: 40.0,
        }
    }

    #[test]
    fn test_attributes_follow_the_mappings() {
        let scatter = Scatter {
            radius: |u: f64| 10.0 * u,
            size: |_: f64| 3.0,
            brightness: |_: f64| 0.25,
        };
        let set = BlobSet::scatter(NoiseSeed::new(5), 1, 12, &geometry(), &scatter);
        assert_eq!(set.blobs().len(), 12);
        for blob in set.blobs() {
            assert!((blob.x - 50.0).hypot(blob.y - 50.0) <= 10.0 + 1e-9);
            assert_eq!(blob.size, 3.0);
            assert_eq!(blob.brightness, 0.25);
        }
        assert_eq!(set, BlobSet::scatter(NoiseSeed::new(5), 1, 12, &geometry(), &scatter));
    }

    #[test]
    fn test_coverage_saturates_and_cuts_off() {
        let scatter = Scatter {
            radius: |_: f64| 0.0,
            size: |_: f64| 2.0,
            brightness: |_: f64| 1.0,
        };
        let set = BlobSet::scatter(NoiseSeed::new(1), 2, 3, &geometry(), &scatter);
        assert_eq!(set.coverage(50.0, 50.0), 1.0);
        assert_eq!(set.coverage(50.0 + 8.5, 50.0), 0.0);
    }
}
