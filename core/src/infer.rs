//! Column type inference from raw string cells.
//!
//! A column's type is decided by testing every cell, never a sample. The
//! precedence is fixed: [`Integer`](ColumnType::Integer), then
//! [`Float`](ColumnType::Float), then [`Boolean`](ColumnType::Boolean), with
//! [`String`](ColumnType::String) as the fallback. A single cell that fails a
//! test disqualifies the whole column from that type.
//!
//! Because integers are checked first, a column holding only `0` and `1`
//! is reported as `Integer` even though every value is also a valid boolean
//! token.

use tracing::trace;

use crate::table::Table;
use crate::types::ColumnType;

const BOOLEAN_TOKENS: &[&str] = &["0", "1", "y", "n", "t", "f", "true", "false", "yes", "no"];
const AFFIRMATIVE_TOKENS: &[&str] = &["1", "y", "t", "true", "yes"];

/// Returns `true` if `cell` is a base-10 integer literal of any width.
///
/// Surrounding whitespace is ignored; a leading `+` or `-` is allowed.
pub fn is_integer(cell: &str) -> bool {
    let trimmed = cell.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

/// Returns `true` if `cell` is a finite floating-point literal.
///
/// `nan` and `inf` parse as floats but are rejected, since JSON output has no
/// way to represent them.
pub fn is_float(cell: &str) -> bool {
    cell.trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}

/// Returns `true` if `cell` is one of the recognized boolean tokens.
///
/// Matching is case-insensitive after trimming:
/// `0`, `1`, `y`, `n`, `t`, `f`, `true`, `false`, `yes`, `no`.
pub fn is_boolean(cell: &str) -> bool {
    matches_token(cell, BOOLEAN_TOKENS)
}

/// Returns `true` if `cell` is an affirmative boolean token
/// (`1`, `y`, `t`, `true`, `yes`, case-insensitive).
pub fn is_affirmative(cell: &str) -> bool {
    matches_token(cell, AFFIRMATIVE_TOKENS)
}

fn matches_token(cell: &str, tokens: &[&str]) -> bool {
    let normalized = cell.trim().to_ascii_lowercase();
    tokens.contains(&normalized.as_str())
}

/// Infers the type of a single column from all of its cells.
///
/// A column without cells is [`ColumnType::String`].
///
/// # Examples
///
/// ```
/// use tabconv_core::{ColumnType, infer_column};
///
/// assert_eq!(infer_column(["1", "0", "1"]), ColumnType::Integer);
/// assert_eq!(infer_column(["1.0", "2", "3"]), ColumnType::Float);
/// assert_eq!(infer_column(["yes", "No"]), ColumnType::Boolean);
/// assert_eq!(infer_column(["yes", "maybe"]), ColumnType::String);
/// ```
pub fn infer_column<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_any = false;
    let mut all_integer = true;
    let mut all_float = true;
    let mut all_boolean = true;

    for cell in cells {
        seen_any = true;
        all_integer = all_integer && is_integer(cell);
        all_float = all_float && is_float(cell);
        all_boolean = all_boolean && is_boolean(cell);
        if !(all_integer || all_float || all_boolean) {
            return ColumnType::String;
        }
    }

    if !seen_any {
        ColumnType::String
    } else if all_integer {
        ColumnType::Integer
    } else if all_float {
        ColumnType::Float
    } else if all_boolean {
        ColumnType::Boolean
    } else {
        ColumnType::String
    }
}

/// Infers one type per column of `table`, aligned with its header.
pub fn infer_column_types(table: &Table) -> Vec<ColumnType> {
    (0..table.width())
        .map(|index| {
            let column_type = infer_column(table.column(index));
            trace!(column = %table.header()[index], %column_type, "inferred column type");
            column_type
        })
        .collect()
}
