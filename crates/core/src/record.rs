//! Single-row feature record handed to the model.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::request::PredictionRequest;
use crate::schema::{
    ColumnKind, DEPARTMENT_COLUMN, EVENT_OBJECTIVE_COLUMN, PLANNED_COST_COLUMN, PROJECT_COLUMN,
};

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

impl FeatureValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            FeatureValue::Text(_) => ColumnKind::Categorical,
            FeatureValue::Number(_) => ColumnKind::Numeric,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            FeatureValue::Number(_) => None,
        }
    }
}

/// One named cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub value: FeatureValue,
}

/// Ordered single-row record.
///
/// [`FeatureRecord::assemble`] always yields the trained schema. The raw
/// constructors below do not check anything; a record built or edited through
/// them may disagree with the model, and only inference will notice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRecord {
    columns: Vec<Column>,
}

impl FeatureRecord {
    /// Lay out a request's fields in model column order.
    pub fn assemble(request: &PredictionRequest) -> Self {
        let mut columns = Vec::with_capacity(crate::schema::COLUMN_COUNT);
        let text = |name: &str, value: &str| Column {
            name: name.to_string(),
            value: FeatureValue::Text(value.to_string()),
        };
        columns.push(text(PROJECT_COLUMN, &request.project));
        columns.push(text(DEPARTMENT_COLUMN, &request.department));
        columns.push(text(EVENT_OBJECTIVE_COLUMN, &request.event_objective));
        columns.extend(request.cost_code_entries().map(|(code, value)| Column {
            name: code.to_string(),
            value: FeatureValue::Number(value),
        }));
        columns.push(Column {
            name: PLANNED_COST_COLUMN.to_string(),
            value: FeatureValue::Number(request.planned_cost),
        });
        Self { columns }
    }

    pub fn from_columns<N, I>(columns: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, FeatureValue)>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|(name, value)| Column {
                    name: name.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Copy of this record with `name` removed.
    pub fn without(&self, name: &str) -> Self {
        Self {
            columns: self.columns.iter().filter(|c| c.name != name).cloned().collect(),
        }
    }

    /// Copy of this record with `name` set to `value` (appended if absent).
    pub fn with_value(&self, name: &str, value: FeatureValue) -> Self {
        let mut out = self.clone();
        match out.columns.iter_mut().find(|c| c.name == name) {
            Some(col) => col.value = value,
            None => out.columns.push(Column {
                name: name.to_string(),
                value,
            }),
        }
        out
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.value)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FeatureValue::as_number)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FeatureValue::as_text)
    }

    /// Planned cost as carried by this record, if present and numeric.
    pub fn planned_cost(&self) -> Option<f64> {
        self.number(PLANNED_COST_COLUMN)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<&PredictionRequest> for FeatureRecord {
    fn from(request: &PredictionRequest) -> Self {
        Self::assemble(request)
    }
}

// Serialized as a JSON object whose key order follows the columns.
impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for col in &self.columns {
            map.serialize_entry(&col.name, &col.value)?;
        }
        map.end()
    }
}
