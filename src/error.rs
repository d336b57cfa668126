use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for shapejoin operations.
#[derive(Debug, Error)]
pub enum ShapejoinError {
    #[error(
        "No attribute row matched any geometry record ({attribute_rows} row(s), \
         {geometry_records} record(s)); check that both sides use the same key type"
    )]
    NoMatch {
        attribute_rows: usize,
        geometry_records: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse attribute CSV from {path}: {source}")]
    AttributeCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid attribute CSV {path}: {message}")]
    AttributeCsvInvalid { path: PathBuf, message: String },

    #[error("Failed to parse geometry JSON from {path}: {source}")]
    GeometryJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write geometry JSON to {path}: {source}")]
    GeometryJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write GeoJSON to {path}: {source}")]
    GeoJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportWrite(#[source] serde_json::Error),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
