//! `petrocost-core`: feature assembly for the cost model.
//!
//! This crate contains **pure** form/record primitives (no model, no I/O).

pub mod error;
pub mod record;
pub mod request;
pub mod schema;

pub use error::{DomainError, DomainResult};
pub use record::{Column, FeatureRecord, FeatureValue};
pub use request::{PredictionRequest, parse_number};
pub use schema::{
    CATEGORICAL_COLUMNS, COLUMN_COUNT, COST_CODES, ColumnKind, ColumnSpec, PLANNED_COST_COLUMN,
    column_names, feature_columns, is_cost_code,
};
