//! JSON reader for geometry records.
//!
//! Shapefile decoding happens upstream; this module reads the already-parsed
//! records it produces, one JSON object per shape:
//!
//! ```json
//! [
//!   {"key": 19001, "points": [[0,0],[1,0],[1,1],[0,0]]},
//!   {"key": 19003, "points": [[...], ...], "parts": [0, 4]}
//! ]
//! ```
//!
//! `parts` is optional and defaults to a single part. The reader does not
//! check offsets; run [`crate::validation::validate_geometry_records`] on
//! the result before trusting it.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::GeometryRecord;
use crate::error::ShapejoinError;

/// Reads geometry records from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_geometry_json(path: &Path) -> Result<Vec<GeometryRecord>, ShapejoinError> {
    let file = File::open(path).map_err(ShapejoinError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| ShapejoinError::GeometryJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes geometry records to a JSON file.
///
/// Mostly useful for producing fixtures from another reader's output.
pub fn write_geometry_json(path: &Path, records: &[GeometryRecord]) -> Result<(), ShapejoinError> {
    let file = File::create(path).map_err(ShapejoinError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, records).map_err(|source| {
        ShapejoinError::GeometryJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads geometry records from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_geometry_json_str(json: &str) -> Result<Vec<GeometryRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads geometry records from JSON bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_geometry_json_slice(bytes: &[u8]) -> Result<Vec<GeometryRecord>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{JoinKey, Point};

    #[test]
    fn test_parse_single_and_multi_part() {
        let json = r#"[
            {"key": 1, "points": [[0,0],[1,0],[1,1],[0,0]]},
            {"key": 3, "points": [[0,0],[1,0],[1,1],[0,0],[5,5],[6,5],[6,6],[5,5]], "parts": [0, 4]}
        ]"#;

        let records = from_geometry_json_str(json).expect("parse geometry json");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, JoinKey::Int(1));
        assert_eq!(records[0].num_parts(), 1);
        assert_eq!(records[1].parts, vec![0, 4]);
        assert_eq!(records[1].points[4], Point::new(5.0, 5.0));
    }

    #[test]
    fn test_rejects_malformed_points() {
        let json = r#"[{"key": 1, "points": [[0,0,0]]}]"#;
        assert!(from_geometry_json_str(json).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("shapes.json");
        let records = vec![
            GeometryRecord::new(7i64, vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
                .with_parts(vec![0, 1]),
        ];

        write_geometry_json(&path, &records).expect("write geometry json");
        let restored = read_geometry_json(&path).expect("read geometry json");
        assert_eq!(restored, records);
    }
}
