//! # Synthesis Error Types

use galaxia_cache::CacheError;
use galaxia_rendering::RenderError;
use galaxia_shared::ParameterError;
use thiserror::Error;

/// Anything that can stop a synthesis request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    /// Out-of-range or malformed parameters.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// A pipeline stage could not be built or run.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The creation repository refused an operation.
    #[error(transparent)]
    Repository(#[from] CacheError),
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;
