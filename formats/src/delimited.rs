//! CSV reading and writing.
//!
//! Files are comma-delimited with `"` quoting. Quoted fields may contain
//! commas, doubled quotes and line breaks. The first record is the header.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tabconv_core::Table;
use tracing::debug;

use crate::error::{FormatError, Result};

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// Reads a CSV file into a [`Table`].
///
/// # Errors
///
/// Returns [`FormatError::IoError`] if the file cannot be read, and a
/// malformed-input error for ragged rows, unterminated quotes, invalid UTF-8
/// or a missing header.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let table = read_csv(File::open(path)?)?;
    debug!(path = %path.display(), rows = table.len(), columns = table.width(), "read CSV");
    Ok(table)
}

/// Reads CSV text into a [`Table`], taking the first record as the header.
///
/// # Examples
///
/// ```
/// use tabconv_formats::read_csv;
///
/// let table = read_csv("name,note\nann,\"a, b\"\n".as_bytes()).unwrap();
/// assert_eq!(table.header(), ["name", "note"]);
/// assert_eq!(table.rows()[0], ["ann", "a, b"]);
/// ```
pub fn read_csv<R: Read>(mut reader: R) -> Result<Table> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    if let Some(line) = unterminated_quote_line(&input) {
        return Err(FormatError::malformed(format!(
            "unterminated quoted field starting on line {line}"
        )));
    }

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE)
        .has_headers(false)
        .flexible(false)
        .from_reader(input.as_slice());

    let mut records = csv_reader.records();
    let header = match records.next() {
        Some(record) => record_to_cells(&record?),
        None => return Err(FormatError::malformed("input has no header row")),
    };
    let rows = records
        .map(|record| record.map(|record| record_to_cells(&record)))
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    Ok(Table::new(header, rows)?)
}

fn record_to_cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(String::from).collect()
}

/// Returns the 1-based line on which a quoted field opens without ever
/// being closed.
///
/// A quote only opens a field when it is the first character of that field;
/// quotes elsewhere in an unquoted field are literal.
fn unterminated_quote_line(input: &[u8]) -> Option<usize> {
    let mut line = 1;
    let mut open_line = None;
    let mut field_start = true;
    let mut bytes = input.iter().peekable();

    while let Some(&byte) = bytes.next() {
        if byte == b'\n' {
            line += 1;
        }
        if open_line.is_some() {
            if byte == QUOTE {
                if bytes.peek() == Some(&&QUOTE) {
                    bytes.next();
                } else {
                    open_line = None;
                }
            }
            continue;
        }
        match byte {
            QUOTE if field_start => {
                open_line = Some(line);
                field_start = false;
            }
            DELIMITER | b'\n' | b'\r' => field_start = true,
            _ => field_start = false,
        }
    }

    open_line
}

/// Writes records to a CSV file, creating or truncating it.
///
/// Callers are responsible for backing up an existing file first (see
/// [`backup_existing`](crate::backup_existing)).
pub fn write_csv_path(path: impl AsRef<Path>, records: &[Vec<String>]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), records)?;
    debug!(path = %path.display(), records = records.len(), "wrote CSV");
    Ok(())
}

/// Writes records as CSV.
///
/// Every record is written as given; to emit a header, pass it as the first
/// record (see [`Table::to_records`]). Fields are quoted only when they
/// contain a delimiter, quote or line break, and records end with `\r\n`.
///
/// # Examples
///
/// ```
/// use tabconv_formats::write_csv;
///
/// let mut out = Vec::new();
/// write_csv(&mut out, &[vec!["a".into(), "say \"hi\"".into()]]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "a,\"say \"\"hi\"\"\"\r\n");
/// ```
pub fn write_csv<W: Write>(writer: W, records: &[Vec<String>]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE)
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(writer);

    for record in records {
        csv_writer.write_record(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
