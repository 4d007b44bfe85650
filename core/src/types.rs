//! Column type and storage affinity definitions.

use std::fmt;

/// Semantic type inferred for a column from its string cells.
///
/// Variants are listed in inference precedence order: a column is
/// [`Integer`](Self::Integer) before it can be [`Float`](Self::Float), and
/// [`Boolean`](Self::Boolean) only when neither numeric type applies.
///
/// # Examples
///
/// ```
/// use tabconv_core::{Affinity, ColumnType};
///
/// assert_eq!(ColumnType::Float.affinity(), Affinity::Numeric);
/// assert_eq!(ColumnType::Integer.to_string(), "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    Integer,
    Float,
    String,
}

impl ColumnType {
    /// Returns the lowercase name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::String => "string",
        }
    }

    /// Maps the type to the SQLite column affinity used when creating tables.
    ///
    /// Integers share `TEXT` with strings so that values such as zip codes
    /// with leading zeros survive unchanged.
    pub fn affinity(self) -> Affinity {
        match self {
            ColumnType::Float => Affinity::Numeric,
            ColumnType::Boolean => Affinity::Integer,
            ColumnType::Integer | ColumnType::String => Affinity::Text,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQLite storage class declared for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affinity {
    Numeric,
    Integer,
    Text,
}

impl Affinity {
    /// Returns the keyword used in `CREATE TABLE` column definitions.
    pub fn as_sql(self) -> &'static str {
        match self {
            Affinity::Numeric => "NUMERIC",
            Affinity::Integer => "INTEGER",
            Affinity::Text => "TEXT",
        }
    }
}

impl fmt::Display for Affinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
