//! # GALAXIA Procedural
//!
//! Deterministic noise for reproducible images.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed always produces the same field
//! 2. **Two-phase**: build raw values, then normalize with a global scan
//! 3. **Immutable**: normalized grids are read-only and shared freely
//!
//! ## Core Components
//!
//! - `SimplexNoise`: 2D coherent noise with FBM / ridged octave stacking
//! - `NoiseField`: grid evaluation and min/max normalization
//! - `MultiLayerNoise`: macro/meso/micro compositor
//! - `DomainWarp`: coordinate perturbation
//! - `NoiseSource`: whichever of the above a render asks for
//!
//! ## Example
//!
//! ```rust
//! use galaxia_procedural::{FieldSettings, NoiseField, NoiseSeed};
//! use galaxia_shared::NoiseParameters;
//!
//! let settings = FieldSettings::from_parameters(&NoiseParameters::default());
//! let grid = NoiseField::generate(NoiseSeed::new(42), 64, 64, settings).unwrap();
//! assert!(grid.values().iter().all(|v| (0.0..=1.0).contains(v)));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod field;
pub mod layered;
pub mod noise;
pub mod source;
pub mod warp;

pub use error::{NoiseError, NoiseResult};
pub use field::{FieldSettings, NoiseField, NormalizedNoiseGrid, RawField, DEGENERATE_VALUE};
pub use layered::MultiLayerNoise;
pub use noise::{NoiseSeed, SimplexNoise};
pub use source::NoiseSource;
pub use warp::DomainWarp;
