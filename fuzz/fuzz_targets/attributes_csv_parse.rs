//! Fuzz target for attribute CSV parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the attribute table reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use shapejoin::ir::io_attributes_csv::{from_attributes_csv_slice, AttributeCsvOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_attributes_csv_slice(data, &AttributeCsvOptions::new("fips"));
});
