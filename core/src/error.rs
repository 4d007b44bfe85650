//! Error types for tabular model operations.

use thiserror::Error;

use crate::types::ColumnType;

/// Errors raised while building or coercing a [`Table`](crate::Table).
#[derive(Debug, Error)]
pub enum TableError {
    /// Input whose structure cannot form a table (ragged rows, bad quoting,
    /// unparsable documents).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A cell failed to parse under the type inferred for its column.
    ///
    /// Inference validates every cell, so this signals a broken invariant
    /// between inference and coercion rather than bad input.
    #[error("cannot coerce '{value}' in column '{column}' to {column_type}")]
    TypeCoercion {
        column: String,
        value: String,
        column_type: ColumnType,
    },
}

/// Convenience alias for results with [`TableError`].
pub type Result<T> = std::result::Result<T, TableError>;
