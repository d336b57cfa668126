//! Fuzz target for geometry JSON parsing and joining.
//!
//! Parsed records are joined without validation, so arbitrary part offsets
//! reach the decoder. It must never panic on them.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shapejoin::ir::io_geometry_json::from_geometry_json_slice;
use shapejoin::ir::AttributeRow;
use shapejoin::join::join;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(records) = from_geometry_json_slice(data) else {
        return;
    };
    let rows: Vec<AttributeRow> = records
        .iter()
        .map(|record| AttributeRow::new(record.key.clone()))
        .collect();
    let _ = join(&rows, &records);
});
