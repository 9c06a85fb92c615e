//! `petrocost-cli`: the form surface.
//!
//! Collects the 25 form fields (flags, a form file, or interactive prompts),
//! hands the assembled record to the process model and renders the estimate.

pub mod app;
pub mod args;
pub mod display;
pub mod error;
pub mod form;
pub mod settings;

pub use app::{Session, Submission};
pub use args::{Args, Commands};
pub use error::{CliError, CliResult};
pub use settings::Settings;
