//! Batched multi-row inserts.
//!
//! Rows are written with one `INSERT ... VALUES (...), (...)` statement per
//! batch, binding every cell as a parameter. A batch holds at most
//! `batch_size` rows; the last batch holds whatever remains.

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, params_from_iter};
use tabconv_core::StoreValue;
use tracing::debug;

use crate::error::Result;
use crate::naming::quote_identifier;

/// Most bound parameters SQLite accepts in one statement (bundled build).
pub const SQLITE_MAX_VARIABLES: usize = 32_766;

/// Outcome of importing one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Name of the table written to.
    pub table: String,
    /// Number of data rows inserted.
    pub rows: usize,
    /// Number of `INSERT` statements executed.
    pub statements: usize,
}

/// Returns how many rows fit in one statement.
///
/// This is `batch_size`, reduced when `columns * batch_size` would exceed
/// [`SQLITE_MAX_VARIABLES`]. Always at least 1.
pub fn rows_per_statement(batch_size: usize, columns: usize) -> usize {
    let by_variables = SQLITE_MAX_VARIABLES / columns.max(1);
    batch_size.min(by_variables).max(1)
}

/// Inserts `rows` into `table_name`, returning the number of statements
/// executed.
///
/// Every row must hold `width` values. An empty `rows` slice executes
/// nothing.
pub(crate) fn insert_rows(
    conn: &Connection,
    table_name: &str,
    width: usize,
    rows: &[Vec<StoreValue>],
    batch_size: usize,
) -> Result<usize> {
    let chunk_size = rows_per_statement(batch_size, width);
    let placeholders = format!("({})", vec!["?"; width].join(", "));
    let mut statements = 0;

    for chunk in rows.chunks(chunk_size) {
        let sql = format!(
            "INSERT INTO {} VALUES {}",
            quote_identifier(table_name),
            vec![placeholders.as_str(); chunk.len()].join(", ")
        );
        let values = chunk
            .iter()
            .flatten()
            .map(|value| ToSqlOutput::Borrowed(bind_value(value)));
        let inserted = conn.execute(&sql, params_from_iter(values))?;
        statements += 1;
        debug!(table = table_name, statement = statements, rows = inserted, "flushed insert batch");
    }

    Ok(statements)
}

fn bind_value(value: &StoreValue) -> ValueRef<'_> {
    match value {
        StoreValue::Integer(number) => ValueRef::Integer(*number),
        StoreValue::Text(text) => ValueRef::Text(text.as_bytes()),
    }
}
