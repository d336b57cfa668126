#![allow(dead_code)]

use shapejoin::ir::{AttributeRow, GeometryRecord, JoinKey, Point};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_point() -> impl Strategy<Value = Point> {
    (-180.0f64..180.0, -90.0f64..90.0).prop_map(|(x, y)| Point::new(x, y))
}

/// Well-formed part offsets for a stream of `total` points: starts at 0,
/// strictly increasing, all in range. Single-part records get no offsets.
pub fn arb_offsets(total: usize, max_parts: usize) -> BoxedStrategy<Vec<usize>> {
    if total < 2 || max_parts < 2 {
        return Just(Vec::new()).boxed();
    }
    proptest::collection::btree_set(1..total, 0..max_parts.min(total))
        .prop_map(|inner| {
            if inner.is_empty() {
                Vec::new()
            } else {
                std::iter::once(0).chain(inner).collect()
            }
        })
        .boxed()
}

/// A well-formed record for `key` with up to `max_points` points.
pub fn arb_record(key: JoinKey, max_points: usize, max_parts: usize) -> BoxedStrategy<GeometryRecord> {
    (1..=max_points)
        .prop_flat_map(move |total| {
            (
                proptest::collection::vec(arb_point(), total),
                arb_offsets(total, max_parts),
            )
        })
        .prop_map(move |(points, parts)| GeometryRecord::new(key.clone(), points).with_parts(parts))
        .boxed()
}

/// Records with integer keys drawn from `0..key_space`, duplicates allowed.
pub fn arb_records(key_space: i64, max_records: usize) -> BoxedStrategy<Vec<GeometryRecord>> {
    proptest::collection::vec(0..key_space, 0..=max_records)
        .prop_flat_map(|keys| {
            keys.into_iter()
                .map(|k| arb_record(JoinKey::Int(k), 12, 4))
                .collect::<Vec<_>>()
        })
        .boxed()
}

/// Attribute rows with integer keys drawn from `0..key_space`.
pub fn arb_rows(key_space: i64, max_rows: usize) -> BoxedStrategy<Vec<AttributeRow>> {
    proptest::collection::vec((0..key_space, any::<i32>()), 0..=max_rows)
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(k, v)| AttributeRow::new(k).with_field("val", v as i64))
                .collect()
        })
        .boxed()
}
