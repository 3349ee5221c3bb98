//! # Presets
//!
//! Ready-made structural parameter sets. Every preset is a 512x512 image
//! with seed 42; callers override what they need with the `with_*`
//! helpers.

use crate::structural::{
    EllipticalParameters, IrregularParameters, LenticularParameters, MorphologyKind,
    MorphologyParameters, MultiLayerParameters, NoiseParameters, RingParameters,
    SpiralParameters, StructuralParameters, VoronoiClusterParameters,
};

/// Default image side for presets.
pub const PRESET_SIZE: u32 = 512;
/// Default seed for presets.
pub const PRESET_SEED: u64 = 42;

fn base(morphology: MorphologyParameters) -> StructuralParameters {
    StructuralParameters {
        width: PRESET_SIZE,
        height: PRESET_SIZE,
        seed: PRESET_SEED,
        core_size: 0.18,
        galaxy_radius: 230.0,
        warp_strength: 0.0,
        noise: NoiseParameters::default(),
        multi_layer: MultiLayerParameters::default(),
        morphology,
    }
}

impl StructuralParameters {
    /// Preset for a morphology kind.
    #[must_use]
    pub fn preset(kind: MorphologyKind) -> Self {
        match kind {
            MorphologyKind::Spiral => Self::classic_spiral(),
            MorphologyKind::Elliptical => Self::giant_elliptical(),
            MorphologyKind::Ring => Self::ring(),
            MorphologyKind::Irregular => Self::irregular(),
            MorphologyKind::VoronoiCluster => Self::voronoi_cluster(),
            MorphologyKind::Lenticular => Self::lenticular(),
        }
    }

    /// Two loosely wound arms.
    #[must_use]
    pub fn classic_spiral() -> Self {
        base(MorphologyParameters::Spiral(SpiralParameters::default()))
    }

    /// Two arms hanging off a central bar.
    #[must_use]
    pub fn barred_spiral() -> Self {
        let mut params = base(MorphologyParameters::Spiral(SpiralParameters {
            number_of_arms: 2,
            arm_width: 24.0,
            arm_rotation: 2.4,
            bar_length: 0.3,
        }));
        params.core_size = 0.12;
        params
    }

    /// Four tightly wound arms with layered, warped noise.
    #[must_use]
    pub fn multi_arm_spiral() -> Self {
        let mut params = base(MorphologyParameters::Spiral(SpiralParameters {
            number_of_arms: 4,
            arm_width: 18.0,
            arm_rotation: 4.2,
            bar_length: 0.0,
        }));
        params.multi_layer.enabled = true;
        params.warp_strength = 12.0;
        params
    }

    /// Smooth de Vaucouleurs ellipse.
    #[must_use]
    pub fn giant_elliptical() -> Self {
        let mut params = base(MorphologyParameters::Elliptical(
            EllipticalParameters::default(),
        ));
        params.core_size = 0.3;
        params.noise.octaves = 4;
        params
    }

    /// Bulge on a flat disk.
    #[must_use]
    pub fn lenticular() -> Self {
        base(MorphologyParameters::Lenticular(LenticularParameters::default()))
    }

    /// Compact core inside a bright ring.
    #[must_use]
    pub fn ring() -> Self {
        let mut params = base(MorphologyParameters::Ring(RingParameters::default()));
        params.core_size = 0.15;
        params
    }

    /// Clumpy, noise-driven shape.
    #[must_use]
    pub fn irregular() -> Self {
        let mut params = base(MorphologyParameters::Irregular(
            IrregularParameters::default(),
        ));
        params.noise.fractal = crate::structural::FractalKind::Ridged;
        params.warp_strength = 20.0;
        params
    }

    /// Scattered star clusters.
    #[must_use]
    pub fn voronoi_cluster() -> Self {
        base(MorphologyParameters::VoronoiCluster(
            VoronoiClusterParameters::default(),
        ))
    }
}
