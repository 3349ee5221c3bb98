//! # Multi-Layer Noise Compositor
//!
//! Three independently seeded fields at macro, meso and micro scale,
//! combined by weighted sum and normalized again so the composite also
//! spans [0, 1].

use rayon::prelude::*;

use galaxia_shared::{LayerParameters, MultiLayerParameters};

use crate::error::{NoiseError, NoiseResult};
use crate::field::{FieldSettings, NoiseField, NormalizedNoiseGrid, RawField};
use crate::noise::NoiseSeed;

/// Seed offset of the meso layer.
pub const MESO_SEED_OFFSET: u64 = 1000;
/// Seed offset of the micro layer.
pub const MICRO_SEED_OFFSET: u64 = 2000;

/// Composited noise. Samples exactly like a single field.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLayerNoise {
    grid: NormalizedNoiseGrid,
    weights: [f64; 3],
}

impl MultiLayerNoise {
    /// Builds the three layers and composites them.
    ///
    /// The macro layer uses `seed`, meso `seed + 1000`, micro
    /// `seed + 2000`. Every layer shares the octave settings of `base`
    /// but uses its own scale.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::ZeroLayerWeights`] if every weight is zero,
    /// or any error from building a layer.
    pub fn build(
        seed: NoiseSeed,
        width: usize,
        height: usize,
        base: FieldSettings,
        layers: &MultiLayerParameters,
    ) -> NoiseResult<Self> {
        let specs: [(u64, LayerParameters); 3] = [
            (0, layers.macro_layer),
            (MESO_SEED_OFFSET, layers.meso_layer),
            (MICRO_SEED_OFFSET, layers.micro_layer),
        ];
        let weights = specs.map(|(_, layer)| layer.weight);
        if !(weights.iter().sum::<f64>() > 0.0) {
            return Err(NoiseError::ZeroLayerWeights);
        }

        let mut combined = vec![0.0; width * height];
        for (offset, layer) in specs {
            let grid = NoiseField::generate(
                seed.offset(offset),
                width,
                height,
                base.with_scale(layer.scale),
            )?;
            combined
                .par_iter_mut()
                .zip(grid.values().par_iter())
                .for_each(|(acc, &v)| *acc += layer.weight * v);
        }

        let raw = RawField::from_values(width, height, combined)?;
        let grid = NoiseField::normalize(raw);
        tracing::debug!(width, height, ?weights, "composited multi-layer noise");

        Ok(Self { grid, weights })
    }

    /// Composite value at a cell, in [0, 1].
    #[inline]
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.grid.value(x, y)
    }

    /// The normalized composite.
    #[must_use]
    pub const fn grid(&self) -> &NormalizedNoiseGrid {
        &self.grid
    }

    /// Macro, meso, micro weights as configured.
    #[must_use]
    pub const fn weights(&self) -> [f64; 3] {
        self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxia_shared::NoiseParameters;

    fn base() -> FieldSettings {
        FieldSettings::from_parameters(&NoiseParameters {
            octaves: 3,
            ..NoiseParameters::default()
        })
    }

    #[test]
    fn test_composite_is_renormalized() {
        let layers = MultiLayerParameters {
            enabled: true,
            ..MultiLayerParameters::default()
        };
        let noise = MultiLayerNoise::build(NoiseSeed::new(5), 48, 48, base(), &layers).unwrap();

        let values = noise.grid().values();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_single_weighted_layer_equals_that_layer() {
        let layers = MultiLayerParameters {
            enabled: true,
            macro_layer: LayerParameters::new(20.0, 0.0),
            meso_layer: LayerParameters::new(12.0, 1.0),
            micro_layer: LayerParameters::new(5.0, 0.0),
        };
        let seed = NoiseSeed::new(11);
        let composite = MultiLayerNoise::build(seed, 32, 24, base(), &layers).unwrap();
        let meso = NoiseField::generate(
            seed.offset(MESO_SEED_OFFSET),
            32,
            24,
            base().with_scale(12.0),
        )
        .unwrap();

        for (a, b) in composite.grid().values().iter().zip(meso.values()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_weights_rejected() {
        let layers = MultiLayerParameters {
            enabled: true,
            macro_layer: LayerParameters::new(20.0, 0.0),
            meso_layer: LayerParameters::new(12.0, 0.0),
            micro_layer: LayerParameters::new(5.0, 0.0),
        };
        let result = MultiLayerNoise::build(NoiseSeed::new(1), 8, 8, base(), &layers);
        assert_eq!(result.unwrap_err(), NoiseError::ZeroLayerWeights);
    }
}
