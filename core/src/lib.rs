//! Core tabular model, type inference and value coercion.
//!
//! This crate defines the in-memory representation shared by every format
//! adapter and the rules used to move cells between formats:
//!
//! - [`Table`] — an ordered header plus rows of raw string cells.
//! - [`ColumnType`] — the inferred semantic type of a column
//!   (boolean, integer, float or string).
//! - [`Affinity`] — the SQLite storage class a [`ColumnType`] maps to.
//!
//! Inference ([`infer_column`], [`infer_column_types`]) examines every cell of
//! a column and applies a fixed precedence: integer, then float, then boolean,
//! then string.
//!
//! Coercion ([`to_json_value`], [`to_store_value`], [`json_to_cell`]) turns a
//! raw cell into the value a destination format stores.
//!
//! # Example
//!
//! ```
//! use tabconv_core::*;
//!
//! let table = Table::new(
//!     vec!["id".into(), "active".into(), "score".into()],
//!     vec![
//!         vec!["1".into(), "yes".into(), "2.5".into()],
//!         vec!["2".into(), "no".into(), "3".into()],
//!     ],
//! )
//! .unwrap();
//!
//! let types = table.column_types();
//! assert_eq!(types, vec![ColumnType::Integer, ColumnType::Boolean, ColumnType::Float]);
//!
//! let records = json_records(&table, &types).unwrap();
//! assert_eq!(records[0]["active"], serde_json::Value::Bool(true));
//! ```

mod coerce;
mod error;
mod infer;
mod table;
mod types;

pub use coerce::{
    StoreValue, json_records, json_to_cell, store_rows, to_json_value, to_store_value,
};
pub use error::{Result, TableError};
pub use infer::{infer_column, infer_column_types, is_affirmative, is_boolean, is_float, is_integer};
pub use table::Table;
pub use types::{Affinity, ColumnType};
