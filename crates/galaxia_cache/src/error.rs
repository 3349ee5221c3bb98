//! # Cache Error Types

use thiserror::Error;

use crate::hashing::ConfigHash;

/// Errors from the creation repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No record with this id.
    #[error("galaxy record {0} not found")]
    RecordNotFound(u64),

    /// A record with this configuration hash already exists.
    #[error("a record with configuration hash {0} already exists")]
    DuplicateConfig(ConfigHash),

    /// Notes must be finite.
    #[error("invalid note {0}")]
    InvalidNote(String),
}

/// Result type for cache and repository operations.
pub type CacheResult<T> = Result<T, CacheError>;
