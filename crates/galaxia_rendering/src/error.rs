//! # Render Error Types
//!
//! All errors that can occur while building renderers or drawing.

use galaxia_procedural::NoiseError;
use galaxia_shared::ParameterError;
use thiserror::Error;

/// Errors that can occur in the rendering pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Sérsic profile needs `n > 0` and `re > 0`.
    #[error("invalid Sérsic profile: index {index}, effective radius {effective_radius}")]
    InvalidSersic {
        /// Sérsic index.
        index: f64,
        /// Effective radius in pixels.
        effective_radius: f64,
    },

    /// A gradient needs at least two stops.
    #[error("gradient needs at least 2 color stops, got {0}")]
    NotEnoughColorStops(usize),

    /// Stop position outside [0, 1].
    #[error("color stop position {0} outside [0, 1]")]
    InvalidColorStop(f64),

    /// Intensity buffer does not match its dimensions.
    #[error("intensity field size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Buffer length.
        actual: usize,
    },

    /// Parameters out of range.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// Noise construction failed.
    #[error(transparent)]
    Noise(#[from] NoiseError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
