//! Process-wide model slot.
//!
//! The model is loaded at most once per process and is read-only afterwards.
//! A failed load is remembered too: every later submission reports the same
//! `ModelUnavailable` instead of retrying the read.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::ensemble::ObliviousEnsemble;
use crate::model::Regressor;
use crate::result::InferenceError;

pub type SharedModel = Arc<dyn Regressor>;

/// A load-once cell holding the outcome of loading a model.
#[derive(Default)]
pub struct ModelSlot {
    cell: OnceLock<Result<SharedModel, InferenceError>>,
}

impl ModelSlot {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Initialize with `loader` unless already initialized; return the stored outcome.
    pub fn init_with<F>(&self, loader: F) -> Result<SharedModel, InferenceError>
    where
        F: FnOnce() -> Result<SharedModel, InferenceError>,
    {
        self.cell.get_or_init(loader).clone()
    }

    /// Load the JSON ensemble at `path` on first call.
    pub fn init<P: AsRef<Path>>(&self, path: P) -> Result<SharedModel, InferenceError> {
        self.init_with(|| {
            ObliviousEnsemble::load(path.as_ref()).map(|m| Arc::new(m) as SharedModel)
        })
    }

    pub fn get(&self) -> Result<SharedModel, InferenceError> {
        match self.cell.get() {
            Some(outcome) => outcome.clone(),
            None => Err(InferenceError::unavailable("model has not been initialized")),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

static GLOBAL: ModelSlot = ModelSlot::new();

/// Load the process model from `path` (first call only).
pub fn init<P: AsRef<Path>>(path: P) -> Result<SharedModel, InferenceError> {
    GLOBAL.init(path)
}

/// The process model installed by [`init`].
pub fn get() -> Result<SharedModel, InferenceError> {
    GLOBAL.get()
}
