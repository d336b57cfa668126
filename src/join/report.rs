//! Join report types for tracking dropped rows and matching decisions.
//!
//! This module provides structured reporting for a join, similar to how
//! `validation::ValidationReport` tracks input issues. The dropped-row count
//! is how callers notice silent data loss without the join failing.

use serde::Serialize;
use std::fmt;

use crate::ir::JoinKey;

/// Keys listed in a text report before the rest are summarized.
const MAX_LISTED_KEYS: usize = 10;

/// A report generated by a join.
#[derive(Clone, Debug, Default, Serialize)]
pub struct JoinReport {
    /// Number of attribute rows given to the join.
    pub attribute_rows: usize,
    /// Number of geometry records given to the join.
    pub geometry_records: usize,
    /// Number of distinct keys among the geometry records.
    pub distinct_geometry_keys: usize,
    /// Rows that found at least one geometry record.
    pub matched_rows: usize,
    /// Rows with no geometry record; excluded from the output.
    pub dropped_rows: usize,
    /// Matched rows whose key is shared by several records.
    pub duplicate_key_matches: usize,
    /// Matched rows whose single record has several parts.
    pub multi_part_matches: usize,
    /// Keys of dropped rows, in input order (repeats kept).
    pub dropped_keys: Vec<JoinKey>,
    /// Geometry keys no attribute row referenced, in record order.
    pub unused_geometry_keys: Vec<JoinKey>,
    /// Issues noted during the join.
    pub issues: Vec<JoinIssue>,
}

impl JoinReport {
    /// Creates an empty report for the given input sizes.
    pub fn new(attribute_rows: usize, geometry_records: usize) -> Self {
        Self {
            attribute_rows,
            geometry_records,
            ..Default::default()
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: JoinIssue) {
        self.issues.push(issue);
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == JoinSeverity::Warning)
            .count()
    }

    /// Count of info-level issues.
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == JoinSeverity::Info)
            .count()
    }

    /// Returns true if any attribute row was dropped.
    pub fn is_lossy(&self) -> bool {
        self.dropped_rows > 0
    }
}

impl fmt::Display for JoinReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} attribute rows, {} geometry records ({} distinct keys)",
            self.attribute_rows, self.geometry_records, self.distinct_geometry_keys
        )?;
        writeln!(
            f,
            "  matched: {}, dropped: {}",
            self.matched_rows, self.dropped_rows
        )?;

        if !self.dropped_keys.is_empty() {
            writeln!(f, "  dropped keys: {}", list_keys(&self.dropped_keys))?;
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == JoinSeverity::Warning)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == JoinSeverity::Info)
            {
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

fn list_keys(keys: &[JoinKey]) -> String {
    let shown: Vec<String> = keys
        .iter()
        .take(MAX_LISTED_KEYS)
        .map(ToString::to_string)
        .collect();
    let mut out = shown.join(", ");
    if keys.len() > MAX_LISTED_KEYS {
        out.push_str(&format!(" (+{} more)", keys.len() - MAX_LISTED_KEYS));
    }
    out
}

/// A single issue noted during a join.
#[derive(Clone, Debug, Serialize)]
pub struct JoinIssue {
    pub severity: JoinSeverity,
    pub code: JoinIssueCode,
    pub message: String,
}

impl JoinIssue {
    pub fn warning(code: JoinIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: JoinSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn info(code: JoinIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: JoinSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity of a join issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinSeverity {
    /// Data was left out of the output.
    Warning,
    /// A matching convention applied.
    Info,
}

/// Machine-readable issue codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinIssueCode {
    /// Attribute rows had no geometry and were dropped.
    DroppedUnmatchedRows,
    /// Some geometry keys are carried by more than one record.
    DuplicateGeometryKey,
    /// Duplicate-key records contributed only their first part.
    FirstPartOnly,
    /// Some geometry records were never referenced by a row.
    UnusedGeometryRecords,
}
