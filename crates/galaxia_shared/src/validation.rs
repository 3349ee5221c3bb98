//! # Range Validation
//!
//! Parameters are checked before any computation starts. Every rule is
//! evaluated; the caller gets one report listing all violations.

use crate::cosmetic::{ColorScheme, CosmeticParameters};
use crate::error::{ParameterResult, ValidationReport};
use crate::structural::{
    LayerParameters, MorphologyParameters, NoiseParameters, StructuralParameters,
};

/// Largest accepted image side.
pub const MAX_DIMENSION: u32 = 8192;
/// Largest accepted octave count.
pub const MAX_OCTAVES: u32 = 16;
/// Largest accepted arm count.
pub const MAX_ARMS: u32 = 12;
/// Largest accepted clump / cluster count.
pub const MAX_CLUMPS: u32 = 256;
/// Accepted Sérsic index range.
pub const SERSIC_RANGE: (f64, f64) = (0.3, 10.0);
/// Accepted axis ratio range.
pub const AXIS_RATIO_RANGE: (f64, f64) = (0.1, 1.0);
/// Largest bloom radius.
pub const MAX_BLOOM_RADIUS: u32 = 64;
/// Largest bloom intensity.
pub const MAX_BLOOM_INTENSITY: f64 = 5.0;
/// Largest star density (stars per pixel).
pub const MAX_STAR_DENSITY: f64 = 0.05;
/// Largest star size.
pub const MAX_STAR_SIZE: u32 = 32;

/// Accumulates violations for one parameter set.
struct Checker {
    report: ValidationReport,
}

impl Checker {
    fn new() -> Self {
        Self {
            report: ValidationReport::new(),
        }
    }

    fn positive(&mut self, field: &'static str, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            self.report.push(field, format!("must be > 0, got {value}"));
        }
    }

    fn non_negative(&mut self, field: &'static str, value: f64) {
        if !(value.is_finite() && value >= 0.0) {
            self.report.push(field, format!("must be >= 0, got {value}"));
        }
    }

    fn finite(&mut self, field: &'static str, value: f64) {
        if !value.is_finite() {
            self.report.push(field, format!("must be finite, got {value}"));
        }
    }

    fn closed(&mut self, field: &'static str, value: f64, (min, max): (f64, f64)) {
        if !(value >= min && value <= max) {
            self.report
                .push(field, format!("must be in [{min}, {max}], got {value}"));
        }
    }

    fn open_closed(&mut self, field: &'static str, value: f64, (min, max): (f64, f64)) {
        if !(value > min && value <= max) {
            self.report
                .push(field, format!("must be in ({min}, {max}], got {value}"));
        }
    }

    fn count(&mut self, field: &'static str, value: u32, min: u32, max: u32) {
        if value < min || value > max {
            self.report
                .push(field, format!("must be in [{min}, {max}], got {value}"));
        }
    }

    fn layer(&mut self, scale: &'static str, weight: &'static str, layer: LayerParameters) {
        self.positive(scale, layer.scale);
        self.non_negative(weight, layer.weight);
    }

    fn noise(&mut self, noise: &NoiseParameters) {
        self.count("noise.octaves", noise.octaves, 1, MAX_OCTAVES);
        self.open_closed("noise.persistence", noise.persistence, (0.0, 1.0));
        self.closed("noise.lacunarity", noise.lacunarity, (1.0, 8.0));
        self.positive("noise.scale", noise.scale);
    }

    fn morphology(&mut self, morphology: &MorphologyParameters, galaxy_radius: f64) {
        match morphology {
            MorphologyParameters::Spiral(p) => {
                self.count("spiral.number_of_arms", p.number_of_arms, 1, MAX_ARMS);
                self.positive("spiral.arm_width", p.arm_width);
                self.finite("spiral.arm_rotation", p.arm_rotation);
                self.closed("spiral.bar_length", p.bar_length, (0.0, 1.0));
            }
            MorphologyParameters::Elliptical(p) => {
                self.closed("elliptical.sersic_index", p.sersic_index, SERSIC_RANGE);
                self.closed("elliptical.axis_ratio", p.axis_ratio, AXIS_RATIO_RANGE);
                self.finite("elliptical.orientation_angle", p.orientation_angle);
            }
            MorphologyParameters::Lenticular(p) => {
                self.closed("lenticular.sersic_index", p.sersic_index, SERSIC_RANGE);
                self.closed("lenticular.axis_ratio", p.axis_ratio, AXIS_RATIO_RANGE);
                self.finite("lenticular.orientation_angle", p.orientation_angle);
                self.closed("lenticular.disk_contribution", p.disk_contribution, (0.0, 1.0));
            }
            MorphologyParameters::Ring(p) => {
                self.positive("ring.ring_radius", p.ring_radius);
                if p.ring_radius > galaxy_radius {
                    self.report.push(
                        "ring.ring_radius",
                        format!("must not exceed galaxy_radius {galaxy_radius}"),
                    );
                }
                self.positive("ring.ring_width", p.ring_width);
                self.closed("ring.ring_intensity", p.ring_intensity, (0.0, 1.0));
                self.non_negative("ring.core_to_ring_ratio", p.core_to_ring_ratio);
            }
            MorphologyParameters::Irregular(p) => {
                self.closed("irregular.irregularity", p.irregularity, (0.0, 1.0));
                self.count("irregular.clump_count", p.clump_count, 0, MAX_CLUMPS);
                self.positive("irregular.clump_size", p.clump_size);
            }
            MorphologyParameters::VoronoiCluster(p) => {
                self.count("voronoi.cluster_count", p.cluster_count, 1, MAX_CLUMPS);
                self.positive("voronoi.cluster_size", p.cluster_size);
                self.closed(
                    "voronoi.cluster_concentration",
                    p.cluster_concentration,
                    (0.1, 10.0),
                );
            }
        }
    }
}

impl StructuralParameters {
    /// Checks every structural range and returns all violations at once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParameterError::Invalid`] listing every violation.
    pub fn validate(&self) -> ParameterResult<()> {
        let mut check = Checker::new();
        check.count("width", self.width, 1, MAX_DIMENSION);
        check.count("height", self.height, 1, MAX_DIMENSION);
        check.open_closed("core_size", self.core_size, (0.0, 1.0));
        check.positive("galaxy_radius", self.galaxy_radius);
        check.non_negative("warp_strength", self.warp_strength);
        check.noise(&self.noise);

        let layers = &self.multi_layer;
        if layers.enabled {
            check.layer("multi_layer.macro.scale", "multi_layer.macro.weight", layers.macro_layer);
            check.layer("multi_layer.meso.scale", "multi_layer.meso.weight", layers.meso_layer);
            check.layer("multi_layer.micro.scale", "multi_layer.micro.weight", layers.micro_layer);
            let total = layers.macro_layer.weight + layers.meso_layer.weight + layers.micro_layer.weight;
            if !(total > 0.0) {
                check.report.push("multi_layer", "layer weights must not all be zero");
            }
        }

        check.morphology(&self.morphology, self.galaxy_radius);
        check.report.into_result()
    }
}

impl CosmeticParameters {
    /// Checks every cosmetic range and returns all violations at once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParameterError::Invalid`] listing every violation.
    pub fn validate(&self) -> ParameterResult<()> {
        let mut check = Checker::new();

        if let ColorScheme::Gradient { stops } = &self.colors {
            if stops.len() < 2 {
                check.report.push(
                    "colors.stops",
                    format!("need at least 2 stops, got {}", stops.len()),
                );
            }
            for stop in stops {
                check.closed("colors.stops.position", stop.position, (0.0, 1.0));
            }
        }

        check.count("bloom.radius", self.bloom.radius, 0, MAX_BLOOM_RADIUS);
        check.closed("bloom.intensity", self.bloom.intensity, (0.0, MAX_BLOOM_INTENSITY));
        check.closed("bloom.threshold", self.bloom.threshold, (0.0, 1.0));

        check.closed("star_field.density", self.star_field.density, (0.0, MAX_STAR_DENSITY));
        check.count("star_field.max_size", self.star_field.max_size, 1, MAX_STAR_SIZE);
        if self.star_field.diffraction_spikes {
            check.count("star_field.spike_count", self.star_field.spike_count, 1, 16);
        }

        check.report.into_result()
    }
}
