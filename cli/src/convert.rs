//! Conversion orchestration.
//!
//! Each [`Direction`] reads its input through one adapter and writes it
//! through another. Any error aborts the whole conversion; nothing is
//! retried and files already written by an aborted batch export stay in
//! place.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tabconv_core::Table;
use tabconv_formats::{
    ConvertConfig, FormatError, backup_existing, read_csv_path, read_document_path,
    write_csv_path, write_document_path,
};
use tabconv_sqlite::{SqliteError, SqliteStore, table_name_from_path};
use thiserror::Error;
use tracing::info;

/// The four supported conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// CSV file into a table of a SQLite file.
    #[default]
    CsvToSqlite,
    /// Every table of a SQLite file into one CSV file each, in a directory.
    SqliteToCsv,
    /// CSV file into a JSON document.
    CsvToJson,
    /// JSON document into a CSV file.
    JsonToCsv,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::CsvToSqlite => "CSV to SQLite",
            Direction::SqliteToCsv => "SQLite to CSV",
            Direction::CsvToJson => "CSV to JSON",
            Direction::JsonToCsv => "JSON to CSV",
        })
    }
}

/// Errors that abort a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Store(#[from] SqliteError),

    #[error("input '{}' does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A table name that cannot be used as a file name inside the output
    /// directory.
    #[error("table name '{0}' cannot be used as a CSV file name")]
    UnsafeTableName(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// What a finished conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub direction: Direction,
    /// Tables read from the input.
    pub tables: usize,
    /// Data rows written, summed over all tables.
    pub rows: usize,
    /// Files created or overwritten (the SQLite file for CSV to SQLite).
    pub written: Vec<PathBuf>,
    /// Previous destination files moved aside before writing.
    pub backups: Vec<PathBuf>,
}

impl ConversionSummary {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            tables: 0,
            rows: 0,
            written: Vec::new(),
            backups: Vec::new(),
        }
    }
}

impl fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} done: {} row(s) from {} table(s) written to {} file(s).",
            self.direction,
            self.rows,
            self.tables,
            self.written.len()
        )?;
        if !self.backups.is_empty() {
            write!(f, " {} existing file(s) backed up.", self.backups.len())?;
        }
        Ok(())
    }
}

/// Runs conversions with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Converts `input` into `output` in the given direction.
    ///
    /// For [`Direction::SqliteToCsv`], `output` is a directory that is
    /// created if missing; every other direction writes a single file.
    pub fn run(&self, direction: Direction, input: &Path, output: &Path) -> Result<ConversionSummary> {
        if !input.exists() {
            return Err(ConvertError::MissingInput(input.to_path_buf()));
        }
        info!(%direction, input = %input.display(), output = %output.display(), "starting conversion");

        let summary = match direction {
            Direction::CsvToSqlite => self.csv_to_sqlite(input, output),
            Direction::SqliteToCsv => self.sqlite_to_csv(input, output),
            Direction::CsvToJson => self.csv_to_json(input, output),
            Direction::JsonToCsv => self.json_to_csv(input, output),
        }?;

        info!(%direction, tables = summary.tables, rows = summary.rows, "conversion finished");
        Ok(summary)
    }

    fn csv_to_sqlite(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        let table = read_csv_path(input)?;
        let table_name = table_name_from_path(input)?;

        let mut store = SqliteStore::open(output)?;
        let report = store.import_table(&table_name, &table, self.config.batch_size)?;
        store.close()?;

        let mut summary = ConversionSummary::new(Direction::CsvToSqlite);
        summary.tables = 1;
        summary.rows = report.rows;
        summary.written.push(output.to_path_buf());
        Ok(summary)
    }

    fn sqlite_to_csv(&self, input: &Path, output_dir: &Path) -> Result<ConversionSummary> {
        let store = SqliteStore::open_read_only(input)?;
        let tables = store.export_tables()?;
        store.close()?;

        fs::create_dir_all(output_dir).map_err(|source| ConvertError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut summary = ConversionSummary::new(Direction::SqliteToCsv);
        for exported in &tables {
            let path = output_dir.join(csv_file_name(&exported.name)?);
            self.write_csv_table(&path, &exported.table, &mut summary)?;
            summary.tables += 1;
            summary.rows += exported.table.len();
        }
        Ok(summary)
    }

    fn csv_to_json(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        let table = read_csv_path(input)?;
        write_document_path(output, &table, self.config.json_indent)?;

        let mut summary = ConversionSummary::new(Direction::CsvToJson);
        summary.tables = 1;
        summary.rows = table.len();
        summary.written.push(output.to_path_buf());
        Ok(summary)
    }

    fn json_to_csv(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        let table = read_document_path(input)?;

        let mut summary = ConversionSummary::new(Direction::JsonToCsv);
        self.write_csv_table(output, &table, &mut summary)?;
        summary.tables = 1;
        // Objects without keys leave nothing to write.
        summary.rows = if table.width() == 0 { 0 } else { table.len() };
        Ok(summary)
    }

    /// Backs up `path` if it exists, then writes the header and rows of
    /// `table` to it. A table without columns produces an empty file.
    fn write_csv_table(&self, path: &Path, table: &Table, summary: &mut ConversionSummary) -> Result<()> {
        if let Some(backup) = backup_existing(path, &self.config.backup_suffix)? {
            summary.backups.push(backup);
        }
        let records = if table.width() == 0 {
            Vec::new()
        } else {
            table.to_records()
        };
        write_csv_path(path, &records)?;
        summary.written.push(path.to_path_buf());
        Ok(())
    }
}

/// Returns `<table>.csv`, refusing names that would leave the output
/// directory.
fn csv_file_name(table_name: &str) -> Result<String> {
    let unsafe_name = table_name.is_empty()
        || table_name == "."
        || table_name == ".."
        || table_name.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(ConvertError::UnsafeTableName(table_name.to_string()));
    }
    Ok(format!("{table_name}.csv"))
}
