//! # Post-Processing
//!
//! Runs after the whole base image exists, in a fixed order:
//! star field first, then bloom, so bright stars glow too.

pub mod bloom;
pub mod starfield;

use image::RgbaImage;

use galaxia_shared::CosmeticParameters;

pub use bloom::Bloom;
pub use starfield::{Star, StarClass, StarField};

/// Applies every enabled pass.
pub fn apply(image: &mut RgbaImage, cosmetic: &CosmeticParameters, seed: u64) {
    if cosmetic.star_field.enabled {
        StarField::new(cosmetic.star_field, seed).apply(image);
    }
    if cosmetic.bloom.enabled {
        Bloom::new(&cosmetic.bloom).apply(image);
    }
}
