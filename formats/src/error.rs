//! Error types for file format adapters.
//!
//! Provides a unified error type covering I/O, structural problems in CSV
//! and JSON input, backups and configuration.

use std::path::PathBuf;

use tabconv_core::TableError;
use thiserror::Error;

/// Errors that can occur while reading or writing CSV and JSON files.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Malformed input or a coercion failure from the tabular model.
    #[error(transparent)]
    Table(#[from] TableError),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An existing destination could not be renamed out of the way.
    #[error("failed to back up '{}': {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing failure in a configuration file.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration values outside their accepted range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl FormatError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        FormatError::Table(TableError::MalformedInput(message.into()))
    }
}

impl From<csv::Error> for FormatError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => FormatError::IoError(io),
                other => FormatError::malformed(format!("{other:?}")),
            }
        } else {
            FormatError::malformed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            FormatError::IoError(err.into())
        } else {
            FormatError::malformed(format!("invalid JSON document: {err}"))
        }
    }
}

/// Convenience alias for results with [`FormatError`].
pub type Result<T> = std::result::Result<T, FormatError>;
