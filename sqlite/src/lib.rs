//! SQLite import and export for tabconv.
//!
//! This crate writes a [`Table`](tabconv_core::Table) into a SQLite file as
//! one table, and reads every table of a SQLite file back out.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`naming`** — table names derived from source files, identifier
//!   quoting and `CREATE TABLE` generation
//! - **`insert`** — batched multi-row inserts with bound parameters
//! - **`export`** — user table enumeration and full-table reads
//! - **`store`** — [`SqliteStore`], the entry point tying them together
//!
//! # Column affinities
//!
//! Each column is declared with the affinity of its inferred type:
//! floats are `NUMERIC`, booleans `INTEGER` (stored as `1`/`0`), and
//! integers and strings `TEXT`.
//!
//! # Quick start
//!
//! ```no_run
//! use tabconv_core::Table;
//! use tabconv_sqlite::{SqliteStore, table_name_from_path};
//!
//! let table = Table::new(
//!     vec!["name".into(), "active".into()],
//!     vec![vec!["ann".into(), "yes".into()]],
//! )
//! .unwrap();
//!
//! let mut store = SqliteStore::open("people.db").unwrap();
//! let name = table_name_from_path("people.csv").unwrap();
//! store.import_table(&name, &table, 500).unwrap();
//! ```

mod error;
mod export;
mod insert;
mod naming;
mod store;

pub use error::{Result, SqliteError};
pub use insert::{ImportReport, SQLITE_MAX_VARIABLES, rows_per_statement};
pub use naming::{sanitize_table_name, table_name_from_path};
pub use store::{NamedTable, SqliteStore};
