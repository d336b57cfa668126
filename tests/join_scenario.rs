use shapejoin::ir::{AttributeRow, FieldValue, GeometryRecord, JoinKey, Point};
use shapejoin::join::{join, JoinIssueCode};
use shapejoin::ShapejoinError;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

fn scenario() -> (Vec<AttributeRow>, Vec<GeometryRecord>) {
    let rows = vec![
        AttributeRow::new(1i64).with_field("val", 10i64),
        AttributeRow::new(2i64).with_field("val", 20i64),
        AttributeRow::new(3i64).with_field("val", 30i64),
    ];
    let records = vec![
        GeometryRecord::new(1i64, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)])),
        GeometryRecord::new(
            3i64,
            pts(&[
                (2.0, 0.0),
                (3.0, 0.0),
                (3.0, 1.0),
                (2.0, 0.0),
                (5.0, 5.0),
                (6.0, 5.0),
                (6.0, 6.0),
                (5.0, 5.0),
            ]),
        )
        .with_parts(vec![0, 4]),
    ];
    (rows, records)
}

#[test]
fn sparse_table_keeps_matched_rows_only() {
    let (rows, records) = scenario();
    let out = join(&rows, &records).expect("join");

    let keys: Vec<_> = out.dataset.keys().cloned().collect();
    assert_eq!(keys, vec![JoinKey::Int(1), JoinKey::Int(3)]);
    assert_eq!(out.report.dropped_rows, 1);
    assert_eq!(out.report.dropped_keys, vec![JoinKey::Int(2)]);
}

#[test]
fn single_part_key_is_one_four_point_ring() {
    let (rows, records) = scenario();
    let out = join(&rows, &records).expect("join");

    let first = &out.dataset.features[0];
    assert_eq!(first.polygon.rings.len(), 1);
    assert_eq!(first.polygon.rings[0].points(), records[0].points.as_slice());
    assert_eq!(first.attributes.field("val"), Some(&FieldValue::Int(10)));
}

#[test]
fn multi_part_key_splits_at_offset() {
    let (rows, records) = scenario();
    let out = join(&rows, &records).expect("join");

    let second = &out.dataset.features[1];
    assert_eq!(second.polygon.key, JoinKey::Int(3));
    assert_eq!(second.polygon.rings.len(), 2);
    assert_eq!(second.polygon.rings[0].points(), &records[1].points[..4]);
    assert_eq!(second.polygon.rings[1].points(), &records[1].points[4..]);
    assert_eq!(out.report.multi_part_matches, 1);
}

#[test]
fn exactly_one_match_reports_the_rest_as_dropped() {
    let rows: Vec<_> = (1..=5i64).map(AttributeRow::new).collect();
    let records = vec![GeometryRecord::new(4i64, pts(&[(0.0, 0.0), (1.0, 1.0)]))];

    let out = join(&rows, &records).expect("join");
    assert_eq!(out.dataset.len(), 1);
    assert_eq!(out.report.dropped_rows, rows.len() - 1);
    assert!(out
        .report
        .issues
        .iter()
        .any(|i| i.code == JoinIssueCode::DroppedUnmatchedRows));
}

#[test]
fn no_geometry_at_all_is_no_match() {
    let (rows, _) = scenario();
    let err = join(&rows, &[]).unwrap_err();
    assert!(matches!(err, ShapejoinError::NoMatch { .. }));
}

#[test]
fn rerunning_gives_identical_output() {
    let (rows, records) = scenario();
    let a = join(&rows, &records).expect("first join");
    let b = join(&rows, &records).expect("second join");

    assert_eq!(a.dataset, b.dataset);
}

#[test]
fn islands_stored_as_separate_records_become_one_feature() {
    let rows = vec![AttributeRow::new("Dukes")];
    let records = vec![
        GeometryRecord::new("Dukes", pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])),
        GeometryRecord::new("Dukes", pts(&[(4.0, 4.0), (5.0, 4.0), (5.0, 5.0)])),
    ];

    let out = join(&rows, &records).expect("join");
    assert_eq!(out.dataset.len(), 1);
    assert_eq!(out.dataset.features[0].polygon.rings.len(), 2);
    assert_eq!(out.report.duplicate_key_matches, 1);
}
