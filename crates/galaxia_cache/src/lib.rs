//! # GALAXIA Cache
//!
//! Content-addressable reuse of structural work.
//!
//! ## Why split the parameters?
//!
//! Building an intensity field (noise, warp, morphology) dominates render
//! time. Colors and post-processing are cheap. Keying the field by a
//! hash of the structural parameters alone lets any number of palettes,
//! bloom and star settings reuse one field.
//!
//! ## Core Components
//!
//! - `structural_hash` / `cosmetic_hash` / `config_hash`: stable 128-bit ids
//! - `SingleFlightCache`: LRU memoization, one computation per key
//! - `GalaxyRepository`: persistence seam for finished creations

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod hashing;
pub mod repository;
pub mod single_flight;

use galaxia_rendering::IntensityField;

pub use error::{CacheError, CacheResult};
pub use hashing::{
    config_hash, cosmetic_hash, structural_hash, ConfigHash, CosmeticHash, StructuralHash,
};
pub use repository::{GalaxyRecord, GalaxyRepository, InMemoryRepository};
pub use single_flight::{CacheStats, SingleFlightCache};

/// Intensity fields keyed by structural hash.
pub type IntensityCache = SingleFlightCache<StructuralHash, IntensityField>;
