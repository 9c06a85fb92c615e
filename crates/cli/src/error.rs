use std::path::PathBuf;

use thiserror::Error;

use petrocost_core::DomainError;

/// Errors raised by the form surface before a record reaches the model.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("cannot read form file {path}: {reason}")]
    FormFile { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
