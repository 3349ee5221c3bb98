//! # Noise Error Types
//!
//! All errors that can occur while building noise fields.

use thiserror::Error;

/// Errors that can occur in the noise pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    /// Grid with a zero dimension.
    #[error("empty noise grid: {width}x{height}")]
    EmptyGrid {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Feature size must be positive and finite.
    #[error("invalid noise scale: {0}")]
    InvalidScale(f64),

    /// At least one octave is required.
    #[error("noise needs at least one octave")]
    NoOctaves,

    /// Value buffer does not match the grid.
    #[error("noise buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Buffer length.
        actual: usize,
    },

    /// Every compositor weight is zero.
    #[error("multi-layer weights sum to zero")]
    ZeroLayerWeights,
}

/// Result type for noise operations.
pub type NoiseResult<T> = Result<T, NoiseError>;
