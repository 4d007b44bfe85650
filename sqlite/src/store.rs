//! High-level access to a SQLite file holding converted tables.
//!
//! Provides [`SqliteStore`] for importing a [`Table`] as a new (or existing)
//! SQLite table and for exporting every user table back out.
//!
//! # Example
//!
//! ```no_run
//! use tabconv_core::Table;
//! use tabconv_sqlite::{SqliteStore, table_name_from_path};
//!
//! let table = Table::new(vec!["id".into()], vec![vec!["1".into()]]).unwrap();
//! let mut store = SqliteStore::open("sales.db").unwrap();
//!
//! let name = table_name_from_path("2024-sales.csv").unwrap();
//! let report = store.import_table(&name, &table, 500).unwrap();
//! println!("{} rows in {} statement(s)", report.rows, report.statements);
//!
//! for exported in store.export_tables().unwrap() {
//!     println!("{}: {} rows", exported.name, exported.table.len());
//! }
//! ```

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tabconv_core::{Table, store_rows};
use tracing::info;

use crate::error::{Result, SqliteError};
use crate::export::{export_table, user_table_names};
use crate::insert::{ImportReport, insert_rows};
use crate::naming::create_table_sql;

/// A table read out of the store, paired with its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTable {
    pub name: String,
    pub table: Table,
}

/// Wraps a SQLite connection used for a single conversion.
///
/// The connection is opened when the store is created and closed when it is
/// dropped (or explicitly via [`close`](Self::close)).
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Opens an existing database file without write access.
    ///
    /// Unlike [`open`](Self::open), a missing file is an error rather than a
    /// new empty database.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates `table_name` if needed and inserts every row of `table`.
    ///
    /// Column types are inferred from all rows and mapped to affinities.
    /// Rows are inserted in statements of at most `batch_size` rows. The
    /// table creation and all inserts run in one transaction, so a failure
    /// leaves the database unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidTableName`] for an empty name,
    /// [`SqliteError::EmptyHeader`] for a table without columns, a coercion
    /// error if a cell disagrees with its inferred type, or
    /// [`SqliteError::DatabaseError`] if SQLite rejects a statement (for
    /// example a duplicate column name or a column count that does not match
    /// an existing table).
    pub fn import_table(
        &mut self,
        table_name: &str,
        table: &Table,
        batch_size: usize,
    ) -> Result<ImportReport> {
        if table_name.is_empty() {
            return Err(SqliteError::InvalidTableName(table_name.to_string()));
        }

        let column_types = table.column_types();
        let create_sql = create_table_sql(table_name, table.header(), &column_types)?;
        let values = store_rows(table, &column_types)?;

        let tx = self.conn.transaction()?;
        tx.execute_batch(&create_sql)?;
        let statements = insert_rows(&tx, table_name, table.width(), &values, batch_size)?;
        tx.commit()?;

        info!(table = table_name, rows = values.len(), statements, "imported table");
        Ok(ImportReport {
            table: table_name.to_string(),
            rows: values.len(),
            statements,
        })
    }

    /// Lists the user tables in the store, in catalog order.
    pub fn table_names(&self) -> Result<Vec<String>> {
        user_table_names(&self.conn)
    }

    /// Reads every user table in full.
    pub fn export_tables(&self) -> Result<Vec<NamedTable>> {
        self.table_names()?
            .into_iter()
            .map(|name| -> Result<NamedTable> {
                let table = export_table(&self.conn, &name)?;
                Ok(NamedTable { name, table })
            })
            .collect()
    }

    /// Closes the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| SqliteError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            header.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    fn memory_store() -> SqliteStore {
        SqliteStore::from_connection(Connection::open_in_memory().unwrap())
    }

    #[test]
    fn test_import_declares_affinities() {
        let mut store = memory_store();
        let t = table(
            &["id", "price", "ok", "name"],
            &[&["1", "2.5", "yes", "ann"], &["2", "3", "no", "bob"]],
        );
        store.import_table("items", &t, 500).unwrap();

        let mut stmt = store
            .connection()
            .prepare("SELECT name, type FROM pragma_table_info('items')")
            .unwrap();
        let columns: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        let expected = [("id", "TEXT"), ("price", "NUMERIC"), ("ok", "INTEGER"), ("name", "TEXT")];
        assert_eq!(columns.len(), expected.len());
        for ((name, affinity), (want_name, want_affinity)) in columns.iter().zip(expected) {
            assert_eq!(name, want_name);
            assert_eq!(affinity, want_affinity);
        }
    }

    #[test]
    fn test_import_stores_booleans_as_integers() {
        let mut store = memory_store();
        let t = table(&["ok"], &[&["Yes"], &["no"], &["T"]]);
        store.import_table("flags", &t, 500).unwrap();

        let mut stmt = store.connection().prepare("SELECT ok FROM flags").unwrap();
        let values: Vec<i64> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|v| v.unwrap())
            .collect();
        assert_eq!(values, vec![1, 0, 1]);
    }

    #[test]
    fn test_import_report_counts_statements() {
        let mut store = memory_store();
        let rows: Vec<Vec<String>> = (0..1001).map(|i| vec![format!("row {i}")]).collect();
        let t = Table::new(vec!["label".into()], rows).unwrap();

        let report = store.import_table("big", &t, 500).unwrap();
        assert_eq!(report.rows, 1001);
        assert_eq!(report.statements, 3);
    }

    #[test]
    fn test_import_empty_table_creates_schema_only() {
        let mut store = memory_store();
        let report = store.import_table("empty", &table(&["a"], &[]), 500).unwrap();
        assert_eq!(report.statements, 0);
        assert_eq!(store.table_names().unwrap(), vec!["empty"]);
    }

    #[test]
    fn test_import_rejects_empty_name_and_header() {
        let mut store = memory_store();
        assert!(matches!(
            store.import_table("", &table(&["a"], &[]), 500),
            Err(SqliteError::InvalidTableName(_))
        ));
        assert!(matches!(
            store.import_table("t", &table(&[], &[]), 500),
            Err(SqliteError::EmptyHeader(_))
        ));
    }

    #[test]
    fn test_duplicate_columns_roll_back() {
        let mut store = memory_store();
        let err = store
            .import_table("dup", &table(&["a", "a"], &[&["1", "2"]]), 500)
            .unwrap_err();
        assert!(matches!(err, SqliteError::DatabaseError(_)));
        assert!(store.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_export_round_trip() {
        let mut store = memory_store();
        let t = table(&["name", "city"], &[&["ann", "Paris"], &["bob", "Oslo"]]);
        store.import_table("people", &t, 1).unwrap();

        let exported = store.export_tables().unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "people");
        assert_eq!(exported[0].table, t);
    }

    #[test]
    fn test_open_read_only_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        assert!(matches!(
            SqliteStore::open_read_only(&path),
            Err(SqliteError::DatabaseError(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_close() {
        assert!(memory_store().close().is_ok());
    }
}
