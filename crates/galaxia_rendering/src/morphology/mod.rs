//! # Morphologies
//!
//! Each galaxy type maps a pixel to an intensity in [0, 1]. The active
//! type is chosen once per render and dispatched through [`Morphology`].
//!
//! Shared contract:
//!
//! - Intensity is exactly `0.0` beyond the galaxy radius.
//! - Every result is clamped to [0, 1].
//! - Any randomness (clump and cluster placement) happens in `new`.

pub mod blobs;
pub mod elliptical;
pub mod irregular;
pub mod lenticular;
pub mod ring;
pub mod sersic;
pub mod spiral;
pub mod voronoi;

use galaxia_procedural::{NoiseSeed, NoiseSource};
use galaxia_shared::{MorphologyKind, MorphologyParameters, StructuralParameters};

use crate::error::RenderResult;
use crate::geometry::Geometry;

pub use elliptical::EllipticalMorphology;
pub use irregular::IrregularMorphology;
pub use lenticular::LenticularMorphology;
pub use ring::RingMorphology;
pub use sersic::SersicProfile;
pub use spiral::SpiralMorphology;
pub use voronoi::VoronoiClusterMorphology;

/// The active morphology, immutable after construction.
#[derive(Clone, Debug, PartialEq)]
pub enum Morphology {
    /// Spiral arms and core.
    Spiral(SpiralMorphology),
    /// Sérsic ellipse.
    Elliptical(EllipticalMorphology),
    /// Core and ring.
    Ring(RingMorphology),
    /// Noisy clumps.
    Irregular(IrregularMorphology),
    /// Concentrated clusters.
    VoronoiCluster(VoronoiClusterMorphology),
    /// Bulge and disk.
    Lenticular(LenticularMorphology),
}

impl Morphology {
    /// Builds the morphology a parameter set asks for.
    ///
    /// # Errors
    ///
    /// Returns an error if a Sérsic profile cannot be built.
    pub fn new(params: &StructuralParameters) -> RenderResult<Self> {
        let geometry = Geometry::new(params);
        let seed = NoiseSeed::new(params.seed);

        let morphology = match &params.morphology {
            MorphologyParameters::Spiral(p) => {
                Self::Spiral(SpiralMorphology::new(geometry, params.core_size, p))
            }
            MorphologyParameters::Elliptical(p) => {
                Self::Elliptical(EllipticalMorphology::new(geometry, p)?)
            }
            MorphologyParameters::Ring(p) => {
                Self::Ring(RingMorphology::new(geometry, params.core_size, *p))
            }
            MorphologyParameters::Irregular(p) => {
                Self::Irregular(IrregularMorphology::new(geometry, seed, p))
            }
            MorphologyParameters::VoronoiCluster(p) => {
                Self::VoronoiCluster(VoronoiClusterMorphology::new(geometry, seed, p))
            }
            MorphologyParameters::Lenticular(p) => {
                Self::Lenticular(LenticularMorphology::new(geometry, p)?)
            }
        };
        tracing::debug!(kind = %morphology.kind(), "built morphology");
        Ok(morphology)
    }

    /// Intensity at a pixel, in [0, 1].
    #[inline]
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        match self {
            Self::Spiral(m) => m.intensity(x, y, noise),
            Self::Elliptical(m) => m.intensity(x, y, noise),
            Self::Ring(m) => m.intensity(x, y, noise),
            Self::Irregular(m) => m.intensity(x, y, noise),
            Self::VoronoiCluster(m) => m.intensity(x, y, noise),
            Self::Lenticular(m) => m.intensity(x, y, noise),
        }
    }

    /// Which morphology this is.
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
}
