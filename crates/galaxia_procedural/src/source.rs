//! # Noise Source
//!
//! The active noise for a render: a single field or the multi-layer
//! composite. Morphologies only see `sample(x, y)`.

use galaxia_shared::StructuralParameters;

use crate::error::NoiseResult;
use crate::field::{FieldSettings, NoiseField, NormalizedNoiseGrid};
use crate::layered::MultiLayerNoise;
use crate::noise::NoiseSeed;

/// Normalized noise in [0, 1], shared read-only by pixel workers.
#[derive(Clone, Debug, PartialEq)]
pub enum NoiseSource {
    /// One seeded field.
    Single(NormalizedNoiseGrid),
    /// Macro/meso/micro composite.
    Layered(MultiLayerNoise),
}

impl NoiseSource {
    /// Builds the noise a set of structural parameters asks for.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, invalid octave settings or
    /// all-zero layer weights.
    pub fn from_parameters(params: &StructuralParameters) -> NoiseResult<Self> {
        let seed = NoiseSeed::new(params.seed);
        let width = params.width as usize;
        let height = params.height as usize;
        let settings = FieldSettings::from_parameters(&params.noise);

        if params.multi_layer.enabled {
            let layered =
                MultiLayerNoise::build(seed, width, height, settings, &params.multi_layer)?;
            Ok(Self::Layered(layered))
        } else {
            Ok(Self::Single(NoiseField::generate(seed, width, height, settings)?))
        }
    }

    /// Noise value at a cell, in [0, 1].
    #[inline]
    #[must_use]
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        match self {
            Self::Single(grid) => grid.value(x, y),
            Self::Layered(layered) => layered.value(x, y),
        }
    }

    /// The underlying normalized grid.
    #[must_use]
    pub const fn grid(&self) -> &NormalizedNoiseGrid {
        match self {
            Self::Single(grid) => grid,
            Self::Layered(layered) => layered.grid(),
        }
    }

    /// Grid width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.grid().width()
    }

    /// Grid height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.grid().height()
    }
}

impl From<NormalizedNoiseGrid> for NoiseSource {
    fn from(grid: NormalizedNoiseGrid) -> Self {
        Self::Single(grid)
    }
}
