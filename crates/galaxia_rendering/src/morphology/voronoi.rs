//! Cluster fields: bright knots concentrated toward the center by a
//! power law on the placement radius.

use galaxia_procedural::{NoiseSeed, NoiseSource};
use galaxia_shared::VoronoiClusterParameters;

use crate::geometry::{gaussian, radial_falloff, Geometry};
use crate::morphology::blobs::{BlobSet, Scatter};

/// Sub-seed purpose for cluster placement.
pub const CLUSTER_PURPOSE: u64 = 0x434c_5553_5452;

const PLACEMENT_FRACTION: f64 = 0.85;

/// Voronoi-cluster evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiClusterMorphology {
    geometry: Geometry,
    clusters: BlobSet,
}

impl VoronoiClusterMorphology {
    /// Creates the evaluator and places every cluster.
    #[must_use]
    pub fn new(geometry: Geometry, seed: NoiseSeed, params: &VoronoiClusterParameters) -> Self {
        let reach = PLACEMENT_FRACTION * geometry.radius;
        let concentration = params.cluster_concentration;
        let cluster_size = params.cluster_size;
        let scatter = Scatter {
            radius: move |u: f64| reach * u.powf(concentration),
            size: move |u: f64| cluster_size * (0.6 + 0.8 * u),
            brightness: |u: f64| 0.5 + 0.5 * u,
        };
        let clusters =
            BlobSet::scatter(seed, CLUSTER_PURPOSE, params.cluster_count, &geometry, &scatter);
        Self { geometry, clusters }
    }

    /// Intensity at a pixel, in [0, 1].
    #[must_use]
    pub fn intensity(&self, x: usize, y: usize, noise: &NoiseSource) -> f64 {
        let Some(p) = self.geometry.locate(x, y) else {
            return 0.0;
        };
        let core = 0.5 * gaussian(p.normalized, 0.1);
        let clusters = self.clusters.coverage(x as f64, y as f64);

        let modulation = 0.5 + 0.5 * noise.sample(x, y);
        ((core + clusters) * radial_falloff(p.normalized, 1.5) * modulation).clamp(0.0, 1.0)
    }

    /// The placed clusters.
    #[must_use]
    pub const fn clusters(&self) -> &BlobSet {
        &self.clusters
    }
}
