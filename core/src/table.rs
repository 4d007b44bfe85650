//! In-memory tabular model shared by all format adapters.

use crate::error::{Result, TableError};
use crate::infer::infer_column_types;
use crate::types::ColumnType;

/// An ordered header plus rows of raw string cells.
///
/// Every row holds exactly one cell per header entry. Readers build a
/// `Table` once per conversion; writers consume it without mutating it.
///
/// # Examples
///
/// ```
/// use tabconv_core::Table;
///
/// let table = Table::new(
///     vec!["name".into(), "qty".into()],
///     vec![vec!["apple".into(), "3".into()]],
/// )
/// .unwrap();
///
/// assert_eq!(table.width(), 2);
/// assert_eq!(table.column(1).collect::<Vec<_>>(), vec!["3"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, checking that every row matches the header width.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedInput`] naming the first data row
    /// (1-based) whose cell count differs from the header length.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = header.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(TableError::MalformedInput(format!(
                "row {} has {} cells, expected {width}",
                index + 1,
                row.len()
            )));
        }
        Ok(Self { header, rows })
    }

    /// Column names in order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the cells of column `index`, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`width`](Self::width) and the table
    /// has at least one row.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }

    /// Infers one [`ColumnType`] per column from all data rows.
    pub fn column_types(&self) -> Vec<ColumnType> {
        infer_column_types(self)
    }

    /// Returns the header followed by every data row.
    ///
    /// This is the record layout the CSV writer expects when a header line
    /// must appear in the output.
    pub fn to_records(&self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(self.header.clone());
        records.extend(self.rows.iter().cloned());
        records
    }

    /// Splits the table into its header and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.header, self.rows)
    }
}
