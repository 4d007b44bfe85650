//! Reading SQLite tables back into the tabular model.

use rusqlite::Connection;
use rusqlite::types::ValueRef;
use tabconv_core::Table;
use tracing::debug;

use crate::error::Result;
use crate::naming::quote_identifier;

/// Lists user tables in catalog order, skipping SQLite's internal
/// `sqlite_*` tables.
pub(crate) fn user_table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Reads every row of `table_name` in result order.
///
/// The header comes from the column names reported by the query.
pub(crate) fn export_table(conn: &Connection, table_name: &str) -> Result<Table> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_identifier(table_name)))?;
    let header: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = header.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let cells = (0..width)
            .map(|index| row.get_ref(index).map(cell_text))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.push(cells);
    }

    debug!(table = table_name, rows = rows.len(), columns = width, "exported table");
    Ok(Table::new(header, rows)?)
}

/// Renders a stored value as CSV cell text.
///
/// `NULL` becomes an empty cell. Whole-valued reals keep one fractional
/// digit (`3.0`) so they stay distinguishable from integers.
fn cell_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(number) => number.to_string(),
        ValueRef::Real(number) => format_real(number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn format_real(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e16 {
        format!("{number:.1}")
    } else {
        number.to_string()
    }
}
