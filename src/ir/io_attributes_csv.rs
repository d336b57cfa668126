//! CSV reader for attribute tables.
//!
//! The table is a header row followed by one row per observation. One
//! column is designated as the join key; every other column becomes a named
//! field on the [`AttributeRow`], in header order, with its type inferred
//! per cell (integer, then float, then text; empty cells are null).
//!
//! Row order is preserved: it is the order features appear in the joined
//! output.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::key::{JoinKey, KeyKind};
use super::model::{AttributeRow, FieldValue};
use crate::error::ShapejoinError;

/// Options for reading an attribute table.
#[derive(Clone, Debug)]
pub struct AttributeCsvOptions {
    /// Header name of the join key column.
    pub key_column: String,

    /// How key cells are interpreted.
    pub key_kind: KeyKind,
}

impl AttributeCsvOptions {
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            key_kind: KeyKind::default(),
        }
    }

    pub fn with_key_kind(mut self, key_kind: KeyKind) -> Self {
        self.key_kind = key_kind;
        self
    }
}

/// Reads attribute rows from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, if the key column
/// is missing, or if a key cell cannot be read as the requested kind.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use shapejoin::ir::io_attributes_csv::{read_attributes_csv, AttributeCsvOptions};
///
/// let rows = read_attributes_csv(Path::new("yields.csv"), &AttributeCsvOptions::new("fips"))?;
/// # Ok::<(), shapejoin::ShapejoinError>(())
/// ```
pub fn read_attributes_csv(
    path: &Path,
    opts: &AttributeCsvOptions,
) -> Result<Vec<AttributeRow>, ShapejoinError> {
    let file = File::open(path).map_err(ShapejoinError::Io)?;
    read_rows(BufReader::new(file), opts, path)
}

/// Reads attribute rows from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_attributes_csv_str(
    csv_str: &str,
    opts: &AttributeCsvOptions,
) -> Result<Vec<AttributeRow>, ShapejoinError> {
    from_attributes_csv_slice(csv_str.as_bytes(), opts)
}

/// Reads attribute rows from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_attributes_csv_slice(
    bytes: &[u8],
    opts: &AttributeCsvOptions,
) -> Result<Vec<AttributeRow>, ShapejoinError> {
    read_rows(bytes, opts, Path::new("<bytes>"))
}

fn read_rows<R: Read>(
    reader: R,
    opts: &AttributeCsvOptions,
    path: &Path,
) -> Result<Vec<AttributeRow>, ShapejoinError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| ShapejoinError::AttributeCsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let key_idx = headers
        .iter()
        .position(|h| h.trim() == opts.key_column)
        .ok_or_else(|| ShapejoinError::AttributeCsvInvalid {
            path: path.to_path_buf(),
            message: format!(
                "Key column '{}' not found (columns: {})",
                opts.key_column,
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        })?;

    let mut rows = Vec::new();
    for (line_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|source| ShapejoinError::AttributeCsvParse {
            path: path.to_path_buf(),
            source,
        })?;

        let raw_key = record.get(key_idx).unwrap_or_default();
        let key = JoinKey::parse(raw_key, opts.key_kind).ok_or_else(|| {
            ShapejoinError::AttributeCsvInvalid {
                path: path.to_path_buf(),
                // +2: one for the header, one for 1-based line numbers
                message: format!(
                    "Key '{}' on line {} is not an integer",
                    raw_key,
                    line_idx + 2
                ),
            }
        })?;

        let fields = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(idx, _)| *idx != key_idx)
            .map(|(_, (name, cell))| (name.trim().to_string(), FieldValue::infer(cell)))
            .collect();

        rows.push(AttributeRow { key, fields });
    }

    Ok(rows)
}
