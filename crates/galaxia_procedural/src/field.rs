//! # Noise Fields
//!
//! A noise field is coherent noise evaluated once per cell of a fixed
//! `width x height` grid, then normalized to [0, 1].
//!
//! ## Two Phases
//!
//! ```text
//!   build()                       normalize()
//!   ┌──────────────┐   RawField   ┌──────────────┐   NormalizedNoiseGrid
//!   │ rows in      │ ───────────> │ pass 1: min/ │ ──────────────────────>
//!   │ parallel     │              │ max; pass 2: │   (read-only, shared)
//!   └──────────────┘              │ rescale      │
//!                                 └──────────────┘
//! ```
//!
//! The min/max reduction is a barrier: nothing reads normalized values
//! before the whole grid has been scanned.

use rayon::prelude::*;

use galaxia_shared::{FractalKind, NoiseParameters};

use crate::error::{NoiseError, NoiseResult};
use crate::noise::{NoiseSeed, SimplexNoise};

/// Value every cell takes when the raw field has zero range.
pub const DEGENERATE_VALUE: f64 = 0.5;

/// Octave settings for one field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSettings {
    /// Number of octaves.
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Frequency growth per octave.
    pub lacunarity: f64,
    /// Feature size in pixels.
    pub scale: f64,
    /// Octave stacking mode.
    pub fractal: FractalKind,
}

impl FieldSettings {
    /// Settings from the shared noise parameters.
    #[must_use]
    pub const fn from_parameters(noise: &NoiseParameters) -> Self {
        Self {
            octaves: noise.octaves,
            persistence: noise.persistence,
            lacunarity: noise.lacunarity,
            scale: noise.scale,
            fractal: noise.fractal,
        }
    }

    /// Same settings with another feature size.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn check(&self) -> NoiseResult<()> {
        if self.octaves == 0 {
            return Err(NoiseError::NoOctaves);
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(NoiseError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

/// Un-normalized noise values, row-major.
#[derive(Clone, Debug)]
pub struct RawField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl RawField {
    /// Grid width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Raw values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Wraps arbitrary values (e.g. a weighted layer sum) for normalization.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::SizeMismatch`] if `values.len() != width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> NoiseResult<Self> {
        check_dimensions(width, height)?;
        if values.len() != width * height {
            return Err(NoiseError::SizeMismatch {
                expected: width * height,
                actual: values.len(),
            });
        }
        Ok(Self { width, height, values })
    }

    /// Global `(min, max)` over every cell.
    #[must_use]
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .par_iter()
            .fold(
                || (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            )
            .reduce(
                || (f64::INFINITY, f64::NEG_INFINITY),
                |(a_lo, a_hi), (b_lo, b_hi)| (a_lo.min(b_lo), a_hi.max(b_hi)),
            )
    }
}

/// Immutable grid of values in [0, 1].
///
/// Safe to share read-only across pixel workers.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedNoiseGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl NormalizedNoiseGrid {
    /// A grid where every cell holds `value` (clamped to [0, 1]).
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::EmptyGrid`] for a zero dimension.
    pub fn constant(width: usize, height: usize, value: f64) -> NoiseResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            values: vec![value.clamp(0.0, 1.0); width * height],
        })
    }

    /// Grid width.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Value at a cell. Out-of-range coordinates clamp to the border.
    #[inline]
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> f64 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.values[y * self.width + x]
    }

    /// All values, row-major.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Builds and normalizes seeded noise fields.
pub struct NoiseField;

impl NoiseField {
    /// Evaluates the octave stack at every cell.
    ///
    /// Cell `(x, y)` samples `(x / scale, y / scale)`. Rows are built in
    /// parallel; each cell is a pure function of its coordinates and the
    /// seed, so the result does not depend on scheduling.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, zero octaves or a
    /// non-positive scale.
    pub fn build(
        seed: NoiseSeed,
        width: usize,
        height: usize,
        settings: FieldSettings,
    ) -> NoiseResult<RawField> {
        check_dimensions(width, height)?;
        settings.check()?;

        let noise = SimplexNoise::new(seed);
        let inv_scale = 1.0 / settings.scale;
        let mut values = vec![0.0; width * height];

        values
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let ny = y as f64 * inv_scale;
                for (x, cell) in row.iter_mut().enumerate() {
                    *cell = noise.fractal(
                        settings.fractal,
                        x as f64 * inv_scale,
                        ny,
                        settings.octaves,
                        settings.persistence,
                        settings.lacunarity,
                    );
                }
            });

        Ok(RawField { width, height, values })
    }

    /// Two-pass normalization to [0, 1].
    ///
    /// Pass 1 finds the global min/max, pass 2 rescales
    /// `(v - min) / (max - min)`. A zero-range field becomes a constant
    /// [`DEGENERATE_VALUE`] field instead of dividing by zero.
    #[must_use]
    pub fn normalize(raw: RawField) -> NormalizedNoiseGrid {
        let (min, max) = raw.min_max();
        let range = max - min;
        let RawField { width, height, mut values } = raw;

        if range > 0.0 && range.is_finite() {
            values
                .par_iter_mut()
                .for_each(|v| *v = ((*v - min) / range).clamp(0.0, 1.0));
        } else {
            tracing::debug!(min, max, "zero-range noise field, using constant mid value");
            values.fill(DEGENERATE_VALUE);
        }

        NormalizedNoiseGrid { width, height, values }
    }

    /// `build` followed by `normalize`.
    ///
    /// # Errors
    ///
    /// Same as [`NoiseField::build`].
    pub fn generate(
        seed: NoiseSeed,
        width: usize,
        height: usize,
        settings: FieldSettings,
    ) -> NoiseResult<NormalizedNoiseGrid> {
        let raw = Self::build(seed, width, height, settings)?;
        Ok(Self::normalize(raw))
    }
}

pub(crate) fn check_dimensions(width: usize, height: usize) -> NoiseResult<()> {
    if width == 0 || height == 0 {
        return Err(NoiseError::EmptyGrid { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FieldSettings {
        FieldSettings::from_parameters(&NoiseParameters::default()).with_scale(16.0)
    }

    #[test]
    fn test_normalized_range_hits_both_ends() {
        let grid = NoiseField::generate(NoiseSeed::new(7), 64, 48, settings()).unwrap();

        let min = grid.values().iter().copied().fold(f64::INFINITY, f64::min);
        let max = grid.values().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_degenerate_field_is_mid_value() {
        let raw = RawField::from_values(4, 3, vec![2.5; 12]).unwrap();
        let grid = NoiseField::normalize(raw);
        assert!(grid.values().iter().all(|&v| v == DEGENERATE_VALUE));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = NoiseField::build(NoiseSeed::new(99), 40, 30, settings()).unwrap();
        let b = NoiseField::build(NoiseSeed::new(99), 40, 30, settings()).unwrap();
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn test_ridged_differs_from_fbm() {
        let fbm = NoiseField::build(NoiseSeed::new(3), 32, 32, settings()).unwrap();
        let ridged_settings = FieldSettings {
            fractal: FractalKind::Ridged,
            ..settings()
        };
        let ridged = NoiseField::build(NoiseSeed::new(3), 32, 32, ridged_settings).unwrap();
        assert_ne!(fbm.values(), ridged.values());
    }

    #[test]
    fn test_invalid_inputs_fail_fast() {
        assert!(matches!(
            NoiseField::build(NoiseSeed::new(1), 0, 10, settings()),
            Err(NoiseError::EmptyGrid { .. })
        ));
        assert!(matches!(
            NoiseField::build(NoiseSeed::new(1), 10, 10, settings().with_scale(0.0)),
            Err(NoiseError::InvalidScale(_))
        ));
        let no_octaves = FieldSettings { octaves: 0, ..settings() };
        assert!(matches!(
            NoiseField::build(NoiseSeed::new(1), 10, 10, no_octaves),
            Err(NoiseError::NoOctaves)
        ));
    }

    #[test]
    fn test_value_clamps_to_border() {
        let grid = NormalizedNoiseGrid::constant(3, 2, 0.25).unwrap();
        assert_eq!(grid.value(10, 10), 0.25);
    }
}
