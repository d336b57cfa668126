//! Input validation for shapejoin.
//!
//! The decoder trusts its input: part offsets are taken as given. This
//! module checks what it assumes, so bad records are reported by the
//! caller instead of decoding into odd rings:
//! - Part offsets in range and strictly increasing
//! - Points present and finite
//! - Attribute keys (repeats are allowed but worth knowing about)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::ir::{AttributeRow, GeometryRecord, JoinKey};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates geometry records and returns a report of all issues found.
pub fn validate_geometry_records(
    records: &[GeometryRecord],
    _opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (index, record) in records.iter().enumerate() {
        validate_record(index, record, &mut report);
    }

    report
}

/// Validates attribute rows and returns a report of all issues found.
pub fn validate_attribute_rows(rows: &[AttributeRow], _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut seen: HashMap<&JoinKey, usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        if let Some(first_idx) = seen.get(&row.key) {
            report.add(ValidationIssue::warning(
                IssueCode::DuplicateAttributeKey,
                format!("Key also used by row {}", first_idx),
                IssueContext::Row {
                    index,
                    key: row.key.clone(),
                },
            ));
        } else {
            seen.insert(&row.key, index);
        }
    }

    report
}

fn validate_record(index: usize, record: &GeometryRecord, report: &mut ValidationReport) {
    let context = || IssueContext::Record {
        index,
        key: record.key.clone(),
    };
    let total = record.points.len();

    if total == 0 {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyGeometry,
            "Record has no points",
            context(),
        ));
    }

    // Report the first bad point only; one is enough to reject the record
    if let Some((point_idx, point)) = record
        .points
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite())
    {
        report.add(ValidationIssue::error(
            IssueCode::NonFiniteCoordinate,
            format!(
                "Non-finite coordinate ({}, {}) at point {}",
                point.x, point.y, point_idx
            ),
            context(),
        ));
    }

    if let Some(&first) = record.parts.first() {
        if first != 0 && first < total {
            report.add(ValidationIssue::warning(
                IssueCode::FirstPartOffsetNonZero,
                format!("First part starts at {}; earlier points are unused", first),
                context(),
            ));
        }
    }

    for (part_idx, &offset) in record.parts.iter().enumerate() {
        if total > 0 && offset >= total {
            report.add(ValidationIssue::error(
                IssueCode::PartOffsetOutOfRange,
                format!(
                    "Part {} starts at {} but the record has {} point(s)",
                    part_idx, offset, total
                ),
                context(),
            ));
        }
    }

    if let Some(pos) = record.parts.windows(2).position(|w| w[0] >= w[1]) {
        report.add(ValidationIssue::error(
            IssueCode::PartOffsetsNotIncreasing,
            format!(
                "Part {} starts at {}, not after part {} at {}",
                pos + 1,
                record.parts[pos + 1],
                pos,
                record.parts[pos]
            ),
            context(),
        ));
    }
}
