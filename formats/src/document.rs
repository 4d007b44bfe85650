//! JSON document reading and writing.
//!
//! A document is a top-level array of flat objects, one per row. Writing
//! infers column types and emits native JSON values; reading unifies the
//! keys of every object into a single header.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tabconv_core::{Table, json_records, json_to_cell};
use tracing::debug;

use crate::error::{FormatError, Result};

/// Reads a JSON document file into a [`Table`].
///
/// # Errors
///
/// Returns [`FormatError::IoError`] if the file cannot be read, or a
/// malformed-input error if it is not an array of objects.
pub fn read_document_path(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let table = read_document(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), rows = table.len(), columns = table.width(), "read JSON document");
    Ok(table)
}

/// Reads a JSON array of objects into a [`Table`].
///
/// The header lists every key in order of first appearance across the
/// array. A key missing from an object yields an empty cell, as does an
/// explicit `null`.
///
/// # Examples
///
/// ```
/// use tabconv_formats::read_document;
///
/// let table = read_document(r#"[{"a": 1}, {"a": 2, "b": 3}]"#.as_bytes()).unwrap();
/// assert_eq!(table.header(), ["a", "b"]);
/// assert_eq!(table.rows()[0], ["1", ""]);
/// assert_eq!(table.rows()[1], ["2", "3"]);
/// ```
pub fn read_document<R: Read>(reader: R) -> Result<Table> {
    let document: Value = serde_json::from_reader(reader)?;
    let Value::Array(items) = document else {
        return Err(FormatError::malformed(
            "JSON document must be an array of objects",
        ));
    };

    let objects = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(object),
            other => Err(FormatError::malformed(format!(
                "element {index} of the JSON array is {}, expected an object",
                value_kind(&other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let header = unified_keys(&objects);
    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|object| {
            header
                .iter()
                .map(|key| object.get(key).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(Table::new(header, rows)?)
}

/// Collects the keys of all objects, in order of first appearance.
fn unified_keys(objects: &[Map<String, Value>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for key in objects.iter().flat_map(Map::keys) {
        if seen.insert(key.as_str()) {
            keys.push(key.clone());
        }
    }
    keys
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Writes `table` as a JSON document file, creating or truncating it.
pub fn write_document_path(path: impl AsRef<Path>, table: &Table, indent: usize) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_document(BufWriter::new(file), table, indent)?;
    debug!(path = %path.display(), rows = table.len(), "wrote JSON document");
    Ok(())
}

/// Writes `table` as a JSON array of objects.
///
/// Column types are inferred from every row and each cell is written as its
/// native JSON value. Keys follow header order, nesting is indented by
/// `indent` spaces and the output ends with a newline.
///
/// # Errors
///
/// Returns a coercion error if a cell disagrees with its inferred type, or
/// [`FormatError::IoError`] if writing fails.
///
/// # Examples
///
/// ```
/// use tabconv_core::Table;
/// use tabconv_formats::write_document;
///
/// let table = Table::new(
///     vec!["n".into(), "ok".into()],
///     vec![vec!["1".into(), "yes".into()]],
/// )
/// .unwrap();
///
/// let mut out = Vec::new();
/// write_document(&mut out, &table, 2).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "[\n  {\n    \"n\": 1,\n    \"ok\": true\n  }\n]\n"
/// );
/// ```
pub fn write_document<W: Write>(mut writer: W, table: &Table, indent: usize) -> Result<()> {
    let column_types = table.column_types();
    let records = json_records(table, &column_types)?;

    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
