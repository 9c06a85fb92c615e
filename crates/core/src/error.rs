//! Domain error model.

use thiserror::Error;

/// Result type used across the form/assembly layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers what the form itself can reject before a record reaches the model
/// (malformed numbers, unknown cost codes, a negative budget). Schema
/// mismatches against the trained model are not reported here; they surface
/// from the inference layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or out-of-range input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A field name that is not part of the feature schema.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }
}
