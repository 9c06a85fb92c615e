use petrocost_core::{ColumnSpec, FeatureRecord};

use crate::result::InferenceError;

/// A pre-trained regression model, treated as a black box.
///
/// Implementations must not mutate shared state in `predict`; one instance is
/// loaded per process and reused for every submission.
pub trait Regressor: Send + Sync + 'static {
    /// Human-readable model identifier (for logs and output metadata).
    fn name(&self) -> &str;

    /// Run inference on a single-row record.
    fn predict(&self, record: &FeatureRecord) -> Result<Vec<f64>, InferenceError>;
}

/// Compare a record's columns against the schema a model was trained on.
///
/// Names and order are checked first, then value kinds.
pub fn check_schema(
    expected: &[ColumnSpec],
    record: &FeatureRecord,
) -> Result<(), InferenceError> {
    let mismatch = |detail: String| InferenceError::SchemaMismatch {
        expected: expected.len(),
        found: record.len(),
        detail,
    };

    for (idx, spec) in expected.iter().enumerate() {
        let Some(col) = record.columns().get(idx) else {
            return Err(mismatch(format!("missing column '{}'", spec.name)));
        };
        if col.name != spec.name {
            let detail = if record.get(&spec.name).is_none() {
                format!("missing column '{}'", spec.name)
            } else {
                format!("column {idx} is '{}', expected '{}'", col.name, spec.name)
            };
            return Err(mismatch(detail));
        }
    }

    if let Some(extra) = record.columns().get(expected.len()) {
        return Err(mismatch(format!("unexpected column '{}'", extra.name)));
    }

    for (spec, col) in expected.iter().zip(record.columns()) {
        let found = col.value.kind();
        if found != spec.kind {
            return Err(InferenceError::TypeMismatch {
                column: spec.name.clone(),
                expected: spec.kind,
                found,
            });
        }
    }

    Ok(())
}
