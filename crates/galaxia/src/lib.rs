//! # GALAXIA
//!
//! Deterministic procedural galaxy images.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Synthesizer                          │
//! ├──────────────┬──────────────────┬──────────────────────────┤
//! │ galaxia_cache│ galaxia_rendering│ galaxia_procedural       │
//! │ hash + LRU   │ morphology, color│ noise, layers, warp      │
//! ├──────────────┴──────────────────┴──────────────────────────┤
//! │                    galaxia_shared                          │
//! │          parameters, presets, validation, TOML             │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use galaxia::{CosmeticParameters, StructuralParameters, Synthesizer};
//!
//! let synth = Synthesizer::default();
//! let params = StructuralParameters::barred_spiral().with_size(64, 64);
//! let image = synth.synthesize(&params, &CosmeticParameters::default()).unwrap();
//! assert_eq!(image.dimensions(), (64, 64));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod synthesizer;

pub use error::{SynthesisError, SynthesisResult};
pub use synthesizer::{Synthesizer, SynthesizerConfig, DEFAULT_CACHE_CAPACITY};

/// Re-export sub-crates for convenience.
pub mod cache {
    pub use galaxia_cache::*;
}

/// Re-export noise types.
pub mod procedural {
    pub use galaxia_procedural::*;
}

/// Re-export rendering types.
pub mod rendering {
    pub use galaxia_rendering::*;
}

pub use galaxia_rendering::RgbaImage;
pub use galaxia_shared::*;
