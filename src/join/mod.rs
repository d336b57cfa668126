//! Joining attribute rows to polygon geometry by key.
//!
//! The join runs in one pass:
//!
//! 1. Index the geometry records by key ([`KeyIndex`]).
//! 2. For each attribute row, in input order, resolve its matches into a
//!    [`PolygonEntity`] ([`assemble`]).
//! 3. Drop rows with no match, counting them in the [`JoinReport`].
//! 4. Fail with [`ShapejoinError::NoMatch`] if no row matched at all.
//!
//! Building the index is O(M) in geometry records and every lookup is an
//! average O(1) hash lookup, so a join of N rows is O(N + M). Nothing is
//! shared between calls.

pub mod assemble;
pub mod decode;
pub mod index;
pub mod report;

pub use assemble::{assemble, assemble_with_options, MatchKind};
pub use decode::{decode, first_part};
pub use index::KeyIndex;
pub use report::{JoinIssue, JoinIssueCode, JoinReport, JoinSeverity};

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::ShapejoinError;
use crate::ir::{AttributeRow, CombinedDataset, Feature, GeometryRecord, JoinKey};

/// How rings are taken from records that share a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateRings {
    /// One ring per record, from its first part. Later parts are ignored.
    #[default]
    FirstPartOnly,
    /// Every part of every record, in record then part order.
    AllParts,
}

/// Options for join behavior.
#[derive(Clone, Debug)]
pub struct JoinOptions {
    /// Ring selection for duplicated geometry keys.
    pub duplicate_rings: DuplicateRings,

    /// If false, zero-length rings are removed from each polygon.
    pub keep_empty_rings: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            duplicate_rings: DuplicateRings::default(),
            keep_empty_rings: true,
        }
    }
}

/// The joined dataset plus diagnostics.
#[derive(Clone, Debug)]
pub struct JoinOutput {
    pub dataset: CombinedDataset,
    pub report: JoinReport,
}

/// Joins `rows` to `records` with default options.
///
/// # Errors
/// Returns [`ShapejoinError::NoMatch`] when no row finds any record.
///
/// # Example
/// ```
/// use shapejoin::ir::{AttributeRow, GeometryRecord, Point};
/// use shapejoin::join::join;
///
/// let rows = vec![
///     AttributeRow::new(1i64).with_field("val", 10i64),
///     AttributeRow::new(2i64).with_field("val", 20i64),
/// ];
/// let records = vec![GeometryRecord::new(
///     1i64,
///     vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
/// )];
///
/// let out = join(&rows, &records)?;
/// assert_eq!(out.dataset.len(), 1);
/// assert_eq!(out.report.dropped_rows, 1);
/// # Ok::<(), shapejoin::ShapejoinError>(())
/// ```
pub fn join(
    rows: &[AttributeRow],
    records: &[GeometryRecord],
) -> Result<JoinOutput, ShapejoinError> {
    join_with_options(rows, records, &JoinOptions::default())
}

/// Joins `rows` to `records`.
///
/// Output features keep the relative order of their attribute rows. A row
/// whose key appears more than once in `rows` produces one feature per
/// occurrence.
pub fn join_with_options(
    rows: &[AttributeRow],
    records: &[GeometryRecord],
    opts: &JoinOptions,
) -> Result<JoinOutput, ShapejoinError> {
    let index = KeyIndex::build(records);
    let mut report = JoinReport::new(rows.len(), records.len());
    report.distinct_geometry_keys = index.len();

    let mut features = Vec::with_capacity(rows.len());
    let mut matches: Vec<&GeometryRecord> = Vec::new();
    let mut first_part_only = 0usize;

    for row in rows {
        matches.clear();
        matches.extend(index.lookup(&row.key).iter().map(|&pos| &records[pos]));

        let assembled = MatchKind::of(&matches).and_then(|kind| {
            assemble_with_options(&row.key, &matches, opts).map(|polygon| (kind, polygon))
        });
        let Some((kind, polygon)) = assembled else {
            debug!(key = %row.key, "no geometry for attribute row");
            report.dropped_keys.push(row.key.clone());
            continue;
        };

        match kind {
            MatchKind::Single => {}
            MatchKind::MultiPart => report.multi_part_matches += 1,
            MatchKind::Duplicate => {
                debug!(key = %row.key, records = matches.len(), "duplicate geometry key");
                report.duplicate_key_matches += 1;
                if opts.duplicate_rings == DuplicateRings::FirstPartOnly
                    && matches.iter().any(|r| r.num_parts() > 1)
                {
                    first_part_only += 1;
                }
            }
        }

        features.push(Feature {
            attributes: row.clone(),
            polygon,
        });
    }

    report.matched_rows = features.len();
    report.dropped_rows = rows.len() - features.len();

    if features.is_empty() {
        warn!(
            attribute_rows = rows.len(),
            geometry_records = records.len(),
            "no attribute row matched any geometry record"
        );
        return Err(ShapejoinError::NoMatch {
            attribute_rows: rows.len(),
            geometry_records: records.len(),
        });
    }

    let referenced: HashSet<&JoinKey> = rows.iter().map(|row| &row.key).collect();
    report.unused_geometry_keys = index
        .keys()
        .filter(|key| !referenced.contains(key))
        .cloned()
        .collect();

    add_issues(&mut report, &index, opts, first_part_only);

    if report.dropped_rows > 0 {
        warn!(
            dropped = report.dropped_rows,
            total = rows.len(),
            "attribute rows without geometry were dropped"
        );
    }
    info!(
        matched = report.matched_rows,
        dropped = report.dropped_rows,
        duplicate_keys = report.duplicate_key_matches,
        multi_part = report.multi_part_matches,
        "join complete"
    );

    Ok(JoinOutput {
        dataset: CombinedDataset { features },
        report,
    })
}

fn add_issues(
    report: &mut JoinReport,
    index: &KeyIndex,
    opts: &JoinOptions,
    first_part_only: usize,
) {
    if report.dropped_rows > 0 {
        report.add(JoinIssue::warning(
            JoinIssueCode::DroppedUnmatchedRows,
            format!(
                "{} of {} attribute row(s) have no geometry and were dropped",
                report.dropped_rows, report.attribute_rows
            ),
        ));
    }

    let duplicated = index.duplicate_keys().count();
    if duplicated > 0 {
        let contribution = match opts.duplicate_rings {
            DuplicateRings::FirstPartOnly => "each record contributes one ring",
            DuplicateRings::AllParts => "each record contributes one ring per part",
        };
        report.add(JoinIssue::info(
            JoinIssueCode::DuplicateGeometryKey,
            format!(
                "{} geometry key(s) appear in more than one record; {}",
                duplicated, contribution
            ),
        ));
    }

    if first_part_only > 0 {
        report.add(JoinIssue::warning(
            JoinIssueCode::FirstPartOnly,
            format!(
                "{} row(s) matched duplicated multi-part records; only the first part of each record was used",
                first_part_only
            ),
        ));
    }

    if !report.unused_geometry_keys.is_empty() {
        report.add(JoinIssue::info(
            JoinIssueCode::UnusedGeometryRecords,
            format!(
                "{} geometry key(s) are not referenced by any attribute row",
                report.unused_geometry_keys.len()
            ),
        ));
    }
}
