//! Feature schema: the column names and order the cost model was trained on.
//!
//! Order matters. The model reads columns positionally, so the assembled
//! record must list the categorical fields first, then the 21 cost codes in
//! ascending order, then the planned cost.

use serde::{Deserialize, Serialize};

pub const PROJECT_COLUMN: &str = "PROYECTO";
pub const DEPARTMENT_COLUMN: &str = "DEPARTAMENTO";
pub const EVENT_OBJECTIVE_COLUMN: &str = "OBJETIVO_EVENTO";

/// Free-text categorical columns, in model order.
pub const CATEGORICAL_COLUMNS: [&str; 3] =
    [PROJECT_COLUMN, DEPARTMENT_COLUMN, EVENT_OBJECTIVE_COLUMN];

/// Technical cost-code columns, in model order.
pub const COST_CODES: [&str; 21] = [
    "1000", "1200", "1300", "1400", "1500", "1600", "1700", "1800", "1900", "2000", "2100",
    "2200", "2500", "2600", "2700", "2800", "2900", "3000", "3100", "3200", "3300",
];

/// Budgeted cost column (also the multiplier base for the final estimate).
pub const PLANNED_COST_COLUMN: &str = "COSTO_TOTAL_PLANEADO (US)";

/// Total number of columns in a feature record.
pub const COLUMN_COUNT: usize = CATEGORICAL_COLUMNS.len() + COST_CODES.len() + 1;

/// How a column's value is typed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

impl core::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ColumnKind::Categorical => f.write_str("categorical"),
            ColumnKind::Numeric => f.write_str("numeric"),
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }
}

/// The full feature schema in model order.
pub fn feature_columns() -> Vec<ColumnSpec> {
    let mut columns = Vec::with_capacity(COLUMN_COUNT);
    columns.extend(CATEGORICAL_COLUMNS.iter().map(|c| ColumnSpec::categorical(*c)));
    columns.extend(COST_CODES.iter().map(|c| ColumnSpec::numeric(*c)));
    columns.push(ColumnSpec::numeric(PLANNED_COST_COLUMN));
    columns
}

/// Column names only, in model order.
pub fn column_names() -> Vec<&'static str> {
    CATEGORICAL_COLUMNS
        .iter()
        .chain(COST_CODES.iter())
        .copied()
        .chain(std::iter::once(PLANNED_COST_COLUMN))
        .collect()
}

pub fn is_cost_code(code: &str) -> bool {
    cost_code_index(code).is_some()
}

/// Position of `code` within [`COST_CODES`].
pub fn cost_code_index(code: &str) -> Option<usize> {
    COST_CODES.iter().position(|c| *c == code)
}
