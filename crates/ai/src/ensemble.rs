//! Oblivious decision-tree ensemble loaded from a JSON artifact.
//!
//! Model:
//! - Categorical columns are mapped to numbers through a per-column encoding
//!   table (unseen values fall back to the column default).
//! - Every tree is *oblivious*: all nodes at one depth share a split, so a tree
//!   of depth `d` is `d` splits plus `2^d` leaves. Split `i` sets bit `i` of the
//!   leaf index when `x[feature] > border`.
//! - Output is `bias + scale * sum(leaves)`, a single value.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use petrocost_core::{ColumnKind, ColumnSpec, FeatureRecord, FeatureValue};

use crate::model::{Regressor, check_schema};
use crate::result::InferenceError;

/// Deepest tree accepted; keeps `1 << depth` well inside `usize`.
pub const MAX_TREE_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    #[serde(default)]
    pub values: HashMap<String, f64>,
    #[serde(default)]
    pub default: f64,
}

impl CategoricalEncoding {
    pub fn encode(&self, value: &str) -> f64 {
        self.values.get(value).copied().unwrap_or(self.default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub feature: usize,
    pub border: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousTree {
    pub splits: Vec<Split>,
    pub leaf_values: Vec<f64>,
}

impl ObliviousTree {
    pub fn depth(&self) -> usize {
        self.splits.len()
    }

    fn leaf_index(&self, x: &[f64]) -> usize {
        self.splits
            .iter()
            .enumerate()
            .fold(0usize, |idx, (bit, split)| {
                if x[split.feature] > split.border {
                    idx | (1 << bit)
                } else {
                    idx
                }
            })
    }

    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.leaf_values[self.leaf_index(x)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousEnsemble {
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub features: Vec<ColumnSpec>,
    #[serde(default)]
    pub categorical_encodings: HashMap<String, CategoricalEncoding>,
    #[serde(default)]
    pub bias: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub trees: Vec<ObliviousTree>,
}

fn default_scale() -> f64 {
    1.0
}

impl ObliviousEnsemble {
    /// Read and validate an artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let model = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            model = %model.name,
            version = %model.version,
            trees = model.trees.len(),
            "loaded cost model"
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self, InferenceError> {
        let model: Self = serde_json::from_str(raw)
            .map_err(|e| InferenceError::unavailable(format!("malformed model artifact: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    /// Structural checks so that `predict` can index without bounds failures.
    pub fn validate(&self) -> Result<(), InferenceError> {
        let bad = |msg: String| Err(InferenceError::unavailable(msg));

        if self.features.is_empty() {
            return bad("artifact declares no features".to_string());
        }
        if !(self.bias.is_finite() && self.scale.is_finite()) {
            return bad("bias and scale must be finite".to_string());
        }
        for spec in &self.features {
            if spec.kind == ColumnKind::Categorical
                && !self.categorical_encodings.contains_key(&spec.name)
            {
                return bad(format!("no encoding for categorical feature '{}'", spec.name));
            }
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.depth() > MAX_TREE_DEPTH {
                return bad(format!(
                    "tree {t} has depth {} (max {MAX_TREE_DEPTH})",
                    tree.depth()
                ));
            }
            let leaves = 1usize << tree.depth();
            if tree.leaf_values.len() != leaves {
                return bad(format!(
                    "tree {t} has {} leaves, expected {leaves} for depth {}",
                    tree.leaf_values.len(),
                    tree.depth()
                ));
            }
            if let Some(split) = tree.splits.iter().find(|s| s.feature >= self.features.len()) {
                return bad(format!(
                    "tree {t} splits on feature {} but only {} features exist",
                    split.feature,
                    self.features.len()
                ));
            }
        }
        Ok(())
    }

    /// Numeric feature vector for a record already checked against the schema.
    fn encode(&self, record: &FeatureRecord) -> Vec<f64> {
        self.features
            .iter()
            .zip(record.columns())
            .map(|(spec, col)| match &col.value {
                FeatureValue::Number(v) => *v,
                FeatureValue::Text(s) => self
                    .categorical_encodings
                    .get(&spec.name)
                    .map(|enc| enc.encode(s))
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn raw_score(&self, x: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(x)).sum();
        self.bias + self.scale * sum
    }
}

impl Regressor for ObliviousEnsemble {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Vec<f64>, InferenceError> {
        check_schema(&self.features, record)?;
        let x = self.encode(record);
        Ok(vec![self.raw_score(&x)])
    }
}
