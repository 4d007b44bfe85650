//! Table naming and `CREATE TABLE` generation.
//!
//! A table takes its name from the base name of the CSV it was imported
//! from, minus the extension. Names starting with a digit get a leading
//! underscore, and every ASCII character from `!` through `.` becomes `_`:
//!
//! | File              | Table          |
//! |-------------------|----------------|
//! | `2024-sales.csv`  | `_2024_sales`  |
//! | `data/my.set.csv` | `my_set`       |
//! | `(draft)#1.csv`   | `_draft__1`    |
//!
//! Identifiers are always backtick-quoted, so the names are safe to embed
//! even when they would otherwise be keywords.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tabconv_core::ColumnType;

use crate::error::{Result, SqliteError};

static TABLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9])|[!-.]").expect("static regex must compile"));

/// Applies the table naming rules to a bare name.
///
/// # Examples
///
/// ```
/// use tabconv_sqlite::sanitize_table_name;
///
/// assert_eq!(sanitize_table_name("2024-sales"), "_2024_sales");
/// assert_eq!(sanitize_table_name("orders"), "orders");
/// ```
pub fn sanitize_table_name(name: &str) -> String {
    TABLE_NAME_RE.replace_all(name, "_${1}").into_owned()
}

/// Derives a sanitized table name from a source file path.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidTableName`] if the path has no file name or
/// the name is not valid UTF-8.
pub fn table_name_from_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| SqliteError::InvalidTableName(path.display().to_string()))?;
    Ok(sanitize_table_name(stem))
}

/// Wraps an identifier in backticks, doubling any backtick inside it.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Generates the `CREATE TABLE IF NOT EXISTS` statement for a table.
///
/// Column names are trimmed and each column is declared with the affinity
/// of its inferred type.
///
/// # Errors
///
/// Returns [`SqliteError::EmptyHeader`] if `header` is empty.
pub(crate) fn create_table_sql(
    table_name: &str,
    header: &[String],
    column_types: &[ColumnType],
) -> Result<String> {
    if header.is_empty() {
        return Err(SqliteError::EmptyHeader(table_name.to_string()));
    }

    let columns: Vec<String> = header
        .iter()
        .zip(column_types)
        .map(|(name, column_type)| {
            format!("{} {}", quote_identifier(name.trim()), column_type.affinity())
        })
        .collect();

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ( {} )",
        quote_identifier(table_name),
        columns.join(", ")
    ))
}
