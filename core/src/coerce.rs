//! Conversion of raw cells into destination-format values.
//!
//! Each function takes a cell and the [`ColumnType`] inferred for its column.
//! Inference has already checked every cell, so a cell that fails to parse
//! here is reported as [`TableError::TypeCoercion`] rather than silently
//! falling back to a string.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::{Result, TableError};
use crate::infer::{is_affirmative, is_boolean, is_integer};
use crate::table::Table;
use crate::types::ColumnType;

/// A value ready to be stored in a SQLite column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    /// Boolean columns store `1` or `0`.
    Integer(i64),
    /// Every other column stores the trimmed cell text.
    Text(String),
}

impl fmt::Display for StoreValue {
    /// Renders the value as a SQL literal: integers bare, text wrapped in
    /// double quotes with embedded quotes doubled.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Integer(value) => write!(f, "{value}"),
            StoreValue::Text(text) => write!(f, "\"{}\"", text.replace('"', "\"\"")),
        }
    }
}

/// Converts a cell into the value stored in SQLite.
///
/// Returns `None` if the cell does not parse as `column_type`.
///
/// # Examples
///
/// ```
/// use tabconv_core::{ColumnType, StoreValue, to_store_value};
///
/// assert_eq!(to_store_value("Yes", ColumnType::Boolean), Some(StoreValue::Integer(1)));
/// assert_eq!(to_store_value(" a\"b ", ColumnType::String).unwrap().to_string(), "\"a\"\"b\"");
/// ```
pub fn to_store_value(cell: &str, column_type: ColumnType) -> Option<StoreValue> {
    let trimmed = cell.trim();
    match column_type {
        ColumnType::Boolean => {
            is_boolean(trimmed).then(|| StoreValue::Integer(i64::from(is_affirmative(trimmed))))
        }
        ColumnType::Integer => {
            is_integer(trimmed).then(|| StoreValue::Text(trimmed.to_string()))
        }
        ColumnType::Float => trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|_| StoreValue::Text(trimmed.to_string())),
        ColumnType::String => Some(StoreValue::Text(trimmed.to_string())),
    }
}

/// Converts a cell into its native JSON value.
///
/// Returns `None` if the cell does not parse as `column_type`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tabconv_core::{ColumnType, to_json_value};
///
/// assert_eq!(to_json_value("no", ColumnType::Boolean), Some(json!(false)));
/// assert_eq!(to_json_value("-4", ColumnType::Integer), Some(json!(-4)));
/// assert_eq!(to_json_value("2.5", ColumnType::Float), Some(json!(2.5)));
/// assert_eq!(to_json_value(" x ", ColumnType::String), Some(json!(" x ")));
/// ```
pub fn to_json_value(cell: &str, column_type: ColumnType) -> Option<Value> {
    match column_type {
        ColumnType::Boolean => is_boolean(cell).then(|| Value::Bool(is_affirmative(cell))),
        ColumnType::Integer => integer_number(cell).map(Value::Number),
        ColumnType::Float => cell
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ColumnType::String => Some(Value::String(cell.to_string())),
    }
}

/// Parses an integer literal into an exact JSON number, whatever its width.
///
/// A leading `+` and leading zeros are dropped since JSON allows neither.
fn integer_number(cell: &str) -> Option<Number> {
    if !is_integer(cell) {
        return None;
    }
    let trimmed = cell.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, trimmed.trim_start_matches('+')),
    };
    let digits = digits.trim_start_matches('0');
    let canonical = match (negative, digits.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{digits}"),
        (false, false) => digits.to_string(),
    };
    canonical.parse::<Number>().ok()
}

/// Renders a JSON value as a CSV cell.
///
/// Strings pass through unchanged, `null` becomes an empty cell, and every
/// other value uses its compact JSON text (`true`, `3`, `[1,2]`).
pub fn json_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Coerces every row of `table` into a JSON object keyed by header.
///
/// # Errors
///
/// Returns [`TableError::TypeCoercion`] for the first cell that does not
/// parse under its column type.
pub fn json_records(table: &Table, column_types: &[ColumnType]) -> Result<Vec<Map<String, Value>>> {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(table.header())
                .zip(column_types)
                .map(|((cell, column), &column_type)| {
                    to_json_value(cell, column_type)
                        .map(|value| (column.clone(), value))
                        .ok_or_else(|| coercion_error(column, cell, column_type))
                })
                .collect::<Result<Map<String, Value>>>()
        })
        .collect()
}

/// Coerces every row of `table` into SQLite values, column by column.
///
/// # Errors
///
/// Returns [`TableError::TypeCoercion`] for the first cell that does not
/// parse under its column type.
pub fn store_rows(table: &Table, column_types: &[ColumnType]) -> Result<Vec<Vec<StoreValue>>> {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(table.header())
                .zip(column_types)
                .map(|((cell, column), &column_type)| {
                    to_store_value(cell, column_type)
                        .ok_or_else(|| coercion_error(column, cell, column_type))
                })
                .collect::<Result<Vec<StoreValue>>>()
        })
        .collect()
}

fn coercion_error(column: &str, cell: &str, column_type: ColumnType) -> TableError {
    TableError::TypeCoercion {
        column: column.to_string(),
        value: cell.to_string(),
        column_type,
    }
}
