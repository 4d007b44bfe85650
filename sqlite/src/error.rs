//! Error types for SQLite import and export.
//!
//! Provides a unified error type covering database access, table naming and
//! failures carried up from the tabular model.

use tabconv_core::TableError;
use thiserror::Error;

/// Errors that can occur while moving tables in and out of SQLite.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Malformed input or a coercion failure from the tabular model.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A table without columns cannot be created.
    #[error("table '{0}' has no columns")]
    EmptyHeader(String),

    /// No usable table name could be derived.
    #[error("invalid table name '{0}'")]
    InvalidTableName(String),
}

/// Convenience alias for results with [`SqliteError`].
pub type Result<T> = std::result::Result<T, SqliteError>;
