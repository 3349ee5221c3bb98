//! # Parameter Error Types
//!
//! All errors that can occur while reading or checking parameters.

use std::fmt;

use thiserror::Error;

/// One out-of-range field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Dotted field path, e.g. `noise.octaves`.
    pub field: &'static str,
    /// What the field must satisfy.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one validation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Records a violation.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }

    /// Appends every violation of another report.
    pub fn merge(&mut self, other: Self) {
        self.violations.extend(other.violations);
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// The recorded violations, in check order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true if the given field was flagged.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// `Ok(())` when empty, otherwise the whole report as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::Invalid`] if any violation was recorded.
    pub fn into_result(self) -> ParameterResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ParameterError::Invalid(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parameter violation(s)", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

/// Errors that can occur in the parameter layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// One or more fields are out of range.
    #[error("invalid parameters: {0}")]
    Invalid(ValidationReport),

    /// Morphology tag not in the registration table.
    #[error("unknown morphology: {0}")]
    UnknownMorphology(String),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying IO error text.
        reason: String,
    },
}

/// Result type for parameter operations.
pub type ParameterResult<T> = Result<T, ParameterError>;
