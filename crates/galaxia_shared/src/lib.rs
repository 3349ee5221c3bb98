//! # GALAXIA Shared
//!
//! Parameter types used by every stage of the synthesis pipeline.
//!
//! ## The Structural / Cosmetic Split
//!
//! - [`StructuralParameters`] drive noise and morphology. Expensive.
//!   Their hash is the cache key for the intensity field.
//! - [`CosmeticParameters`] drive color mapping and post-processing.
//!   Cheap. Applied fresh on every request.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER touch pixels. If you need a pixel type, put it
//! in `galaxia_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod cosmetic;
pub mod error;
pub mod presets;
pub mod structural;
pub mod validation;

pub use config::SynthesisConfig;
pub use cosmetic::{
    BloomParameters, ColorScheme, ColorStop, CosmeticParameters, FourColorSet, Palette, Rgb,
    StarFieldParameters,
};
pub use error::{ParameterError, ParameterResult, ValidationReport, Violation};
pub use structural::{
    EllipticalParameters, FractalKind, IrregularParameters, LayerParameters,
    LenticularParameters, MorphologyKind, MorphologyParameters, MultiLayerParameters,
    NoiseParameters, RingParameters, SpiralParameters, StructuralParameters,
    VoronoiClusterParameters,
};
