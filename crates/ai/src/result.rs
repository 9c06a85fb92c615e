use thiserror::Error;

use petrocost_core::ColumnKind;

/// Why an inference call did not produce a usable number.
///
/// These never abort the process: callers render them with
/// [`InferenceError::user_message`] and accept a fresh submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Record columns differ from the columns the model was trained on.
    #[error("schema mismatch: expected {expected} columns, found {found} ({detail})")]
    SchemaMismatch {
        expected: usize,
        found: usize,
        detail: String,
    },

    /// A column is present but carries the wrong kind of value.
    #[error("type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },

    /// The model artifact could not be loaded or is not initialized.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model returned no values.
    #[error("model returned an empty prediction")]
    EmptyOutput,

    /// The model returned NaN or an infinity.
    #[error("model returned a non-finite prediction: {0}")]
    NonFiniteOutput(f64),

    /// The record lacks something post-processing needs.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl InferenceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Message shown to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            InferenceError::SchemaMismatch { .. } | InferenceError::TypeMismatch { .. } => format!(
                "prediction failed: {self}. Make sure the columns match the training schema."
            ),
            _ => format!("prediction failed: {self}"),
        }
    }
}
