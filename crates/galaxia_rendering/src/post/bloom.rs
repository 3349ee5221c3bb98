//! # Bloom
//!
//! Threshold extract → separable Gaussian blur → additive composite.
//!
//! The extract keeps pixels whose mean RGB exceeds `threshold · 255` and
//! zeroes the rest. Out-of-image taps read as black.

use image::RgbaImage;
use rayon::prelude::*;

use galaxia_shared::BloomParameters;

/// Bloom pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bloom {
    radius: u32,
    intensity: f64,
    threshold: f64,
}

impl Bloom {
    /// Creates the pass. The `enabled` flag is the caller's concern.
    #[must_use]
    pub const fn new(params: &BloomParameters) -> Self {
        Self {
            radius: params.radius,
            intensity: params.intensity,
            threshold: params.threshold,
        }
    }

    /// True when applying would leave the image unchanged.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !(self.intensity > 0.0)
    }

    /// Normalized 1D kernel of size `2·radius + 1`, σ = size / 3.
    #[must_use]
    pub fn kernel(radius: u32) -> Vec<f32> {
        let size = 2 * radius as usize + 1;
        let sigma = size as f64 / 3.0;
        let center = f64::from(radius);
        let weights: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - center;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();
        weights.iter().map(|w| (w / total) as f32).collect()
    }

    /// Applies bloom in place.
    pub fn apply(&self, image: &mut RgbaImage) {
        if self.is_noop() {
            return;
        }
        let w = image.width() as usize;
        let h = image.height() as usize;
        if w == 0 || h == 0 {
            return;
        }

        let kernel = Self::kernel(self.radius);
        let r = self.radius as usize;
        let cutoff = self.threshold * 255.0;
        let src = image.as_raw();

        let mut bright = vec![0.0f32; w * h * 3];
        bright
            .par_chunks_mut(w * 3)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..w {
                    let si = (y * w + x) * 4;
                    let px = &src[si..si + 3];
                    let mean = (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0;
                    if mean > cutoff {
                        for c in 0..3 {
                            row[x * 3 + c] = f32::from(px[c]);
                        }
                    }
                }
            });

        // Horizontal pass
        let mut h_buf = vec![0.0f32; w * h * 3];
        h_buf
            .par_chunks_mut(w * 3)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..w {
                    let mut sums = [0.0f32; 3];
                    for (k, weight) in kernel.iter().enumerate() {
                        let Some(sx) = (x + k).checked_sub(r).filter(|&sx| sx < w) else {
                            continue;
                        };
                        let si = (y * w + sx) * 3;
                        for c in 0..3 {
                            sums[c] += bright[si + c] * weight;
                        }
                    }
                    row[x * 3..x * 3 + 3].copy_from_slice(&sums);
                }
            });

        // Vertical pass
        let mut v_buf = vec![0.0f32; w * h * 3];
        v_buf
            .par_chunks_mut(w * 3)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..w {
                    let mut sums = [0.0f32; 3];
                    for (k, weight) in kernel.iter().enumerate() {
                        let Some(sy) = (y + k).checked_sub(r).filter(|&sy| sy < h) else {
                            continue;
                        };
                        let si = (sy * w + x) * 3;
                        for c in 0..3 {
                            sums[c] += h_buf[si + c] * weight;
                        }
                    }
                    row[x * 3..x * 3 + 3].copy_from_slice(&sums);
                }
            });

        let gain = self.intensity as f32;
        image
            .par_chunks_mut(w * 4)
            .enumerate()
            .for_each(|(y, row)| {
                for x in 0..w {
                    let bi = (y * w + x) * 3;
                    for c in 0..3 {
                        let original = f32::from(row[x * 4 + c]);
                        let value = original + v_buf[bi + c] * gain;
                        row[x * 4 + c] = value.round().clamp(0.0, 255.0) as u8;
                    }
                }
            });

        tracing::debug!(radius = self.radius, intensity = self.intensity, "applied bloom");
    }
}
