//! Splitting a geometry record's point stream into rings.
//!
//! A record with part offsets `o_1 < o_2 < ... < o_N` over `P` points
//! decodes to `N` rings: ring `i` spans `[o_i, o_{i+1})` and the last ring
//! spans `[o_N, P)`. A record with zero or one offset decodes to a single
//! ring holding every point.
//!
//! Offsets are not validated here. Out-of-range offsets are clamped to the
//! point count and an offset smaller than its predecessor yields an empty
//! ring, so malformed input decodes to something deterministic instead of
//! panicking. Use [`crate::validation`] to reject such records up front.

use std::ops::Range;

use crate::ir::{GeometryRecord, Ring};

/// Decodes a record into one ring per part, in part order.
pub fn decode(record: &GeometryRecord) -> Vec<Ring> {
    part_ranges(record)
        .into_iter()
        .map(|range| Ring::from(&record.points[range]))
        .collect()
}

/// Returns the ring for the record's first part only.
///
/// For a single-part record this is every point.
pub fn first_part(record: &GeometryRecord) -> Ring {
    let total = record.points.len();
    let range = match record.parts.as_slice() {
        [] | [_] => 0..total,
        [first, second, ..] => {
            let start = (*first).min(total);
            start..(*second).min(total).max(start)
        }
    };
    Ring::from(&record.points[range])
}

/// Point ranges covered by each part, clamped to the point stream.
pub fn part_ranges(record: &GeometryRecord) -> Vec<Range<usize>> {
    let total = record.points.len();
    if record.parts.len() <= 1 {
        return vec![0..total];
    }

    record
        .parts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let start = start.min(total);
            let end = record
                .parts
                .get(i + 1)
                .map_or(total, |&next| next.min(total));
            start..end.max(start)
        })
        .collect()
}
