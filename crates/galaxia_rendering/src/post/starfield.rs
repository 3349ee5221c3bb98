//! # Star Field
//!
//! Seeded point process of background stars, drawn over the base image.
//!
//! ## Distribution
//!
//! | Size        | Share |
//! |-------------|-------|
//! | 1-2 px      | 70%   |
//! | 3-4 px      | 25%   |
//! | 5-max px    | 5%    |
//!
//! Color class: white 70%, blue-white 15%, yellow-white 15%.
//! Brightness is uniform in [0.3, 1.0].

use std::f64::consts::TAU;

use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use galaxia_procedural::NoiseSeed;
use galaxia_shared::{Rgb, StarFieldParameters};

/// Sub-seed purpose for star placement.
pub const STAR_PURPOSE: u64 = 0x5354_4152_5321;

/// Alpha of each glow ring.
const GLOW_ALPHA: f64 = 0.22;
/// Stars above this brightness may get spikes.
const SPIKE_BRIGHTNESS: f64 = 0.6;
const SPIKE_MIN_SIZE: u32 = 3;

/// Spectral tint of a star.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StarClass {
    /// Neutral white.
    White,
    /// Hot, bluish.
    BlueWhite,
    /// Cool, yellowish.
    YellowWhite,
}

impl StarClass {
    /// Display color at full brightness.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::White => Rgb::new(255, 255, 255),
            Self::BlueWhite => Rgb::new(200, 220, 255),
            Self::YellowWhite => Rgb::new(255, 240, 200),
        }
    }
}

/// One placed star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Pixel x.
    pub x: u32,
    /// Pixel y.
    pub y: u32,
    /// Size in pixels.
    pub size: u32,
    /// Brightness in [0.3, 1.0].
    pub brightness: f64,
    /// Tint.
    pub class: StarClass,
}

/// Star overlay pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarField {
    params: StarFieldParameters,
    seed: NoiseSeed,
}

impl StarField {
    /// Creates the pass. Placement derives from the render seed.
    #[must_use]
    pub const fn new(params: StarFieldParameters, seed: u64) -> Self {
        Self {
            params,
            seed: NoiseSeed::new(seed),
        }
    }

    /// `floor(density · width · height)`.
    #[must_use]
    pub fn star_count(&self, width: u32, height: u32) -> usize {
        let count = self.params.density * f64::from(width) * f64::from(height);
        if count > 0.0 { count.floor() as usize } else { 0 }
    }

    /// Places every star for an image size.
    #[must_use]
    pub fn generate(&self, width: u32, height: u32) -> Vec<Star> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.derive(STAR_PURPOSE).value());
        let max_size = self.params.max_size.max(1);

        (0..self.star_count(width, height))
            .map(|_| {
                let x = rng.gen_range(0..width);
                let y = rng.gen_range(0..height);

                let size_roll: f64 = rng.gen();
                let size = if size_roll < 0.70 {
                    rng.gen_range(1..=2)
                } else if size_roll < 0.95 {
                    rng.gen_range(3..=4)
                } else {
                    rng.gen_range(5..=max_size.max(5))
                };

                let brightness = rng.gen_range(0.3..=1.0);

                let class_roll: f64 = rng.gen();
                let class = if class_roll < 0.70 {
                    StarClass::White
                } else if class_roll < 0.85 {
                    StarClass::BlueWhite
                } else {
                    StarClass::YellowWhite
                };

                Star {
                    x,
                    y,
                    size: size.min(max_size),
                    brightness,
                    class,
                }
            })
            .collect()
    }

    /// Draws the stars onto the image in placement order.
    ///
    /// Returns the number of stars drawn.
    pub fn apply(&self, image: &mut RgbaImage) -> usize {
        let stars = self.generate(image.width(), image.height());
        for star in &stars {
            self.draw(image, star);
        }
        tracing::debug!(stars = stars.len(), "drew star field");
        stars.len()
    }

    fn draw(&self, image: &mut RgbaImage, star: &Star) {
        let color = star.class.color();
        let cx = f64::from(star.x);
        let cy = f64::from(star.y);

        if star.size <= 2 {
            for dy in 0..star.size {
                for dx in 0..star.size {
                    blend(image, cx + f64::from(dx), cy + f64::from(dy), color, star.brightness);
                }
            }
            return;
        }

        for ring in (1..=star.size).rev() {
            let radius = f64::from(ring) * 0.5 + 0.5;
            fill_circle(image, cx, cy, radius, color, star.brightness * GLOW_ALPHA);
        }
        blend(image, cx, cy, color, star.brightness);

        if self.params.diffraction_spikes
            && star.brightness > SPIKE_BRIGHTNESS
            && star.size >= SPIKE_MIN_SIZE
        {
            let length = f64::from(4 * star.size);
            let count = self.params.spike_count;
            for i in 0..count {
                let angle = TAU * f64::from(i) / f64::from(count);
                let (sin, cos) = angle.sin_cos();
                let mut t = 1.0;
                while t <= length {
                    let alpha = star.brightness * 0.8 * (1.0 - t / length);
                    blend(image, cx + cos * t, cy + sin * t, color, alpha);
                    t += 1.0;
                }
            }
        }
    }
}

fn fill_circle(image: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Rgb, alpha: f64) {
    let reach = radius.ceil() as i64;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (fx, fy) = (dx as f64, dy as f64);
            if fx * fx + fy * fy <= radius * radius {
                blend(image, cx + fx, cy + fy, color, alpha);
            }
        }
    }
}

/// `dst · (1 - a) + color · a`, skipping off-image coordinates.
fn blend(image: &mut RgbaImage, x: f64, y: f64, color: Rgb, alpha: f64) {
    let (x, y) = (x.round(), y.round());
    if x < 0.0 || y < 0.0 || x >= f64::from(image.width()) || y >= f64::from(image.height()) {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    let Rgba([r, g, b, a]) = *pixel;
    let mix = |dst: u8, src: u8| {
        (f64::from(dst) * (1.0 - alpha) + f64::from(src) * alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    *pixel = Rgba([mix(r, color.r), mix(g, color.g), mix(b, color.b), a]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(density: f64, seed: u64) -> StarField {
        StarField::new(
            StarFieldParameters {
                density,
                ..StarFieldParameters::default()
            },
            seed,
        )
    }

    #[test]
    fn test_star_count_floor() {
        assert_eq!(field(0.001, 1).star_count(100, 150), 15);
        assert_eq!(field(0.0, 1).star_count(100, 150), 0);
    }

    #[test]
    fn test_attributes_in_range() {
        let stars = field(0.02, 9).generate(200, 100);
        assert_eq!(stars.len(), 400);
        for star in &stars {
            assert!(star.x < 200 && star.y < 100);
            assert!((1..=6).contains(&star.size));
            assert!((0.3..=1.0).contains(&star.brightness));
        }
        let small = stars.iter().filter(|s| s.size <= 2).count();
        assert!(small > stars.len() / 2);
    }

    #[test]
    fn test_max_size_caps_every_star() {
        let capped = StarField::new(
            StarFieldParameters {
                density: 0.05,
                max_size: 2,
                ..StarFieldParameters::default()
            },
            3,
        );
        assert!(capped.generate(64, 64).iter().all(|s| s.size <= 2));
    }

    #[test]
    fn test_blend_keeps_alpha() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 200]));
        blend(&mut image, 1.0, 1.0, Rgb::WHITE, 1.0);
        assert_eq!(*image.get_pixel(1, 1), Rgba([255, 255, 255, 200]));
        blend(&mut image, -3.0, 9.0, Rgb::WHITE, 1.0);
    }
}
