//! # GALAXIA Rendering
//!
//! Turns structural parameters into an intensity field and cosmetic
//! parameters into pixels.
//!
//! ## Design Principles
//!
//! 1. **Enum dispatch**: one `Morphology` per render, no trait objects
//! 2. **Build once, read many**: noise, warp, clumps and stars are
//!    seeded at construction
//! 3. **Split pipeline**: the intensity field is cacheable, colors are not
//!
//! ## Example
//!
//! ```rust
//! use galaxia_rendering::RenderOrchestrator;
//! use galaxia_shared::{CosmeticParameters, StructuralParameters};
//!
//! let params = StructuralParameters::classic_spiral().with_size(64, 64);
//! let orchestrator = RenderOrchestrator::new(&params).unwrap();
//! let image = orchestrator.render(&CosmeticParameters::default()).unwrap();
//! assert_eq!(image.dimensions(), (64, 64));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod intensity;
pub mod morphology;
pub mod orchestrator;
pub mod post;

pub use color::{smoothstep, ColorMapper, FourZoneMapper, GradientMapper};
pub use error::{RenderError, RenderResult};
pub use geometry::Geometry;
pub use intensity::IntensityField;
pub use morphology::{Morphology, SersicProfile};
pub use orchestrator::RenderOrchestrator;
pub use post::{Bloom, Star, StarClass, StarField};

pub use image::RgbaImage;
