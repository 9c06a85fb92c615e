//! `petrocost-ai`
//!
//! **Responsibility:** inference and post-processing boundary.
//!
//! - The model is a black box behind [`Regressor`]; nothing here depends on
//!   how it was trained.
//! - Schema mismatches are reported as typed [`InferenceError`]s, never panics.
//! - Post-processing ([`derive`]) is pure arithmetic on one model output.

pub mod ensemble;
pub mod estimator;
pub mod model;
pub mod registry;
pub mod result;

pub use ensemble::ObliviousEnsemble;
pub use estimator::{
    Alert, Estimate, Estimator, OVERRUN_THRESHOLD, OutputMode, SAVINGS_THRESHOLD, derive,
};
pub use model::{Regressor, check_schema};
pub use registry::{ModelSlot, SharedModel};
pub use result::InferenceError;
