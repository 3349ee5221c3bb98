//! # Structural Parameters
//!
//! Everything that shapes the intensity field: image size, seed, noise
//! settings and the morphology. These are the expensive inputs; two
//! renders with equal structural parameters share one cached field.
//!
//! ## Determinism Guarantee
//!
//! Given the same `StructuralParameters`, the intensity field is
//! **bit-identical** on every run, in every process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// Octave stacking mode for coherent noise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FractalKind {
    /// Fractal Brownian motion: plain octave sum.
    #[default]
    Fbm,
    /// Ridged multifractal: `(1 - |n|)^2` per octave.
    Ridged,
}

impl FractalKind {
    /// Stable numeric tag, used by hashing.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Fbm => 0,
            Self::Ridged => 1,
        }
    }
}

/// Coherent noise settings shared by every noise layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    /// Number of octaves (1-16).
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Frequency growth per octave.
    pub lacunarity: f64,
    /// Feature size in pixels. Cell `(x, y)` samples noise at `(x/scale, y/scale)`.
    pub scale: f64,
    /// Octave stacking mode.
    pub fractal: FractalKind,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 120.0,
            fractal: FractalKind::Fbm,
        }
    }
}

/// One layer of the macro/meso/micro compositor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerParameters {
    /// Feature size in pixels.
    pub scale: f64,
    /// Weight in the combined sum.
    pub weight: f64,
}

impl LayerParameters {
    /// Creates a layer.
    #[inline]
    #[must_use]
    pub const fn new(scale: f64, weight: f64) -> Self {
        Self { scale, weight }
    }
}

/// Multi-layer noise compositing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiLayerParameters {
    /// When false a single noise field is used.
    pub enabled: bool,
    /// Large-scale structure.
    pub macro_layer: LayerParameters,
    /// Mid-scale structure.
    pub meso_layer: LayerParameters,
    /// Fine detail.
    pub micro_layer: LayerParameters,
}

impl Default for MultiLayerParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            macro_layer: LayerParameters::new(300.0, 0.5),
            meso_layer: LayerParameters::new(90.0, 0.35),
            micro_layer: LayerParameters::new(25.0, 0.15),
        }
    }
}

/// Spiral arms with an optional central bar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParameters {
    /// Number of arms (1-12).
    pub number_of_arms: u32,
    /// Gaussian arm width in pixels (arc distance).
    pub arm_width: f64,
    /// Winding: angle gained per unit of `ln(distance)`.
    pub arm_rotation: f64,
    /// Bar half-length as a fraction of the galaxy radius. 0 disables the bar.
    pub bar_length: f64,
}

impl Default for SpiralParameters {
    fn default() -> Self {
        Self {
            number_of_arms: 2,
            arm_width: 28.0,
            arm_rotation: 3.0,
            bar_length: 0.0,
        }
    }
}

/// Sérsic-profile elliptical galaxy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipticalParameters {
    /// Sérsic index `n` (4 = de Vaucouleurs).
    pub sersic_index: f64,
    /// Minor/major axis ratio (0.1-1).
    pub axis_ratio: f64,
    /// Major axis orientation in degrees.
    pub orientation_angle: f64,
}

impl Default for EllipticalParameters {
    fn default() -> Self {
        Self {
            sersic_index: 4.0,
            axis_ratio: 0.7,
            orientation_angle: 30.0,
        }
    }
}

/// Bulge + exponential disk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LenticularParameters {
    /// Sérsic index of the bulge.
    pub sersic_index: f64,
    /// Bulge axis ratio; the disk uses half of it.
    pub axis_ratio: f64,
    /// Major axis orientation in degrees.
    pub orientation_angle: f64,
    /// Blend weight of the disk against the bulge (0-1).
    pub disk_contribution: f64,
}

impl Default for LenticularParameters {
    fn default() -> Self {
        Self {
            sersic_index: 2.5,
            axis_ratio: 0.6,
            orientation_angle: 15.0,
            disk_contribution: 0.55,
        }
    }
}

/// Core plus a bright ring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingParameters {
    /// Ring radius in pixels.
    pub ring_radius: f64,
    /// Gaussian ring width in pixels.
    pub ring_width: f64,
    /// Ring brightness (0-1).
    pub ring_intensity: f64,
    /// Core weight relative to the ring.
    pub core_to_ring_ratio: f64,
}

impl Default for RingParameters {
    fn default() -> Self {
        Self {
            ring_radius: 130.0,
            ring_width: 18.0,
            ring_intensity: 0.9,
            core_to_ring_ratio: 0.7,
        }
    }
}

/// Clumpy star-forming regions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrregularParameters {
    /// How much noise modulates the result (0-1).
    pub irregularity: f64,
    /// Number of clumps.
    pub clump_count: u32,
    /// Base clump radius in pixels.
    pub clump_size: f64,
}

impl Default for IrregularParameters {
    fn default() -> Self {
        Self {
            irregularity: 0.6,
            clump_count: 14,
            clump_size: 22.0,
        }
    }
}

/// Clusters scattered around the center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoronoiClusterParameters {
    /// Number of cluster centers.
    pub cluster_count: u32,
    /// Base cluster radius in pixels.
    pub cluster_size: f64,
    /// Power-law exponent; above 1 pulls clusters toward the center.
    pub cluster_concentration: f64,
}

impl Default for VoronoiClusterParameters {
    fn default() -> Self {
        Self {
            cluster_count: 24,
            cluster_size: 16.0,
            cluster_concentration: 1.6,
        }
    }
}

/// Morphology tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MorphologyKind {
    /// Logarithmic spiral arms.
    Spiral = 0,
    /// Sérsic ellipse.
    Elliptical = 1,
    /// Core and ring.
    Ring = 2,
    /// Noise-modulated clumps.
    Irregular = 3,
    /// Gaussian clusters.
    VoronoiCluster = 4,
    /// Bulge and disk.
    Lenticular = 5,
}

impl MorphologyKind {
    /// Every kind, in tag order.
    pub const ALL: [Self; 6] = [
        Self::Spiral,
        Self::Elliptical,
        Self::Ring,
        Self::Irregular,
        Self::VoronoiCluster,
        Self::Lenticular,
    ];

    /// Tag table, indexed by discriminant.
    const TAGS: [&'static str; 6] = [
        "SPIRAL",
        "ELLIPTICAL",
        "RING",
        "IRREGULAR",
        "VORONOI_CLUSTER",
        "LENTICULAR",
    ];

    /// Returns the external tag (e.g. `"VORONOI_CLUSTER"`).
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        Self::TAGS[self as usize]
    }
}

impl fmt::Display for MorphologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MorphologyKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::TAGS
            .iter()
            .position(|tag| *tag == upper)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| ParameterError::UnknownMorphology(s.to_owned()))
    }
}

/// The morphology together with its own parameters.
///
/// Only the active kind's parameters exist, so inactive fields can
/// never leak into the structural hash.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MorphologyParameters {
    /// Spiral galaxy.
    Spiral(SpiralParameters),
    /// Elliptical galaxy.
    Elliptical(EllipticalParameters),
    /// Ring galaxy.
    Ring(RingParameters),
    /// Irregular galaxy.
    Irregular(IrregularParameters),
    /// Cluster field.
    VoronoiCluster(VoronoiClusterParameters),
    /// Lenticular galaxy.
    Lenticular(LenticularParameters),
}

impl MorphologyParameters {
    /// Returns the tag of this morphology.
    #[must_use]
    pub const fn kind(&self) -> MorphologyKind {
        match self {
            Self::Spiral(_) => MorphologyKind::Spiral,
            Self::Elliptical(_) => MorphologyKind::Elliptical,
            Self::Ring(_) => MorphologyKind::Ring,
            Self::Irregular(_) => MorphologyKind::Irregular,
            Self::VoronoiCluster(_) => MorphologyKind::VoronoiCluster,
            Self::Lenticular(_) => MorphologyKind::Lenticular,
        }
    }

    /// Default parameters for a kind.
    #[must_use]
    pub fn defaults_for(kind: MorphologyKind) -> Self {
        match kind {
            MorphologyKind::Spiral => Self::Spiral(SpiralParameters::default()),
            MorphologyKind::Elliptical => Self::Elliptical(EllipticalParameters::default()),
            MorphologyKind::Ring => Self::Ring(RingParameters::default()),
            MorphologyKind::Irregular => Self::Irregular(IrregularParameters::default()),
            MorphologyKind::VoronoiCluster => {
                Self::VoronoiCluster(VoronoiClusterParameters::default())
            }
            MorphologyKind::Lenticular => Self::Lenticular(LenticularParameters::default()),
        }
    }
}

impl Default for MorphologyParameters {
    fn default() -> Self {
        Self::Spiral(SpiralParameters::default())
    }
}

/// Everything that determines the intensity field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralParameters {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Master seed. Every stochastic stage derives from it.
    pub seed: u64,
    /// Core size as a fraction of the galaxy radius, in (0, 1].
    pub core_size: f64,
    /// Galaxy radius in pixels. Intensity is zero beyond it.
    pub galaxy_radius: f64,
    /// Domain warp displacement in pixels. 0 disables warping.
    pub warp_strength: f64,
    /// Coherent noise settings.
    pub noise: NoiseParameters,
    /// Macro/meso/micro compositing.
    pub multi_layer: MultiLayerParameters,
    /// Morphology and its specific parameters.
    pub morphology: MorphologyParameters,
}

impl Default for StructuralParameters {
    fn default() -> Self {
        Self::classic_spiral()
    }
}

impl StructuralParameters {
    /// Returns a copy with a different seed.
    #[inline]
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy with a different image size.
    #[inline]
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns a copy with a different morphology.
    #[inline]
    #[must_use]
    pub const fn with_morphology(mut self, morphology: MorphologyParameters) -> Self {
        self.morphology = morphology;
        self
    }

    /// Number of pixels in the image.
    #[inline]
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Image center `(width/2, height/2)` using integer halves.
    #[inline]
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width / 2), f64::from(self.height / 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morphology_tags_round_trip_through_from_str() {
        for kind in MorphologyKind::ALL {
            let parsed: MorphologyKind = kind.tag().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert_eq!(
            "voronoi-cluster".parse::<MorphologyKind>().unwrap(),
            MorphologyKind::VoronoiCluster
        );
    }

    #[test]
    fn test_unknown_morphology_is_rejected() {
        let err = "barred".parse::<MorphologyKind>().unwrap_err();
        assert!(matches!(err, ParameterError::UnknownMorphology(ref s) if s == "barred"));
    }

    #[test]
    fn test_defaults_for_matches_kind() {
        for kind in MorphologyKind::ALL {
            assert_eq!(MorphologyParameters::defaults_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_center_uses_integer_halves() {
        let params = StructuralParameters::default().with_size(101, 51);
        assert_eq!(params.center(), (50.0, 25.0));
    }
}
