//! File format adapters for tabconv.
//!
//! This crate moves [`Table`](tabconv_core::Table)s in and out of files:
//!
//! - **CSV** ([`read_csv_path`], [`write_csv_path`]) — comma-delimited,
//!   double-quote quoted text whose first record is the header.
//! - **JSON documents** ([`read_document_path`], [`write_document_path`]) —
//!   an array of flat objects with natively typed values.
//!
//! It also owns the pieces of plumbing every conversion shares: renaming an
//! existing destination out of the way ([`backup_existing`]) and the
//! YAML-loadable [`ConvertConfig`].
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use tabconv_formats::{ConvertConfig, backup_existing, read_csv_path, write_document_path};
//!
//! let config = ConvertConfig::default();
//! let table = read_csv_path("sales.csv").unwrap();
//! write_document_path("sales.json", &table, config.json_indent).unwrap();
//!
//! // CSV destinations are moved to `<name>~` before being rewritten.
//! backup_existing(Path::new("copy.csv"), &config.backup_suffix).unwrap();
//! ```

mod backup;
mod config;
mod delimited;
mod document;
mod error;

pub use backup::{backup_existing, backup_path};
pub use config::{
    ConvertConfig, DEFAULT_BACKUP_SUFFIX, DEFAULT_BATCH_SIZE, DEFAULT_JSON_INDENT,
};
pub use delimited::{read_csv, read_csv_path, write_csv, write_csv_path};
pub use document::{read_document, read_document_path, write_document, write_document_path};
pub use error::{FormatError, Result};
