//! Batch matching: label, match and aggregate a list of candidates.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{info, warn};

use crate::matcher::{match_candidate, Candidate, MatchOutcome, WarningCode};
use crate::persona::PersonaRegistry;

/// Best-department marker for rows that could not be matched.
pub const INVALID_LABEL: &str = "Invalid";

/// Message shown in place of distances on invalid rows.
pub const REMEDIATION_MESSAGE: &str = "Please adjust scores (0-100, avoid all zeros)";

// ─────────────────────────────────────────────────────────────────
// Rows
// ─────────────────────────────────────────────────────────────────

/// One candidate's row in the result table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    /// "Candidate N", 1-based.
    pub label: String,
    pub candidate: Candidate,
    pub outcome: MatchOutcome,
}

impl RowResult {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    /// Department name, or `"Invalid"`.
    pub fn best_department(&self) -> &str {
        self.outcome.best_department().unwrap_or(INVALID_LABEL)
    }

    /// Remediation message for invalid rows.
    pub fn message(&self) -> Option<&'static str> {
        if self.is_valid() {
            None
        } else {
            Some(REMEDIATION_MESSAGE)
        }
    }
}

/// Flat row: `Candidate`, `Best Department`, then either one column per
/// department or `Message`.
impl Serialize for RowResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("Candidate", &self.label)?;
        map.serialize_entry("Best Department", self.best_department())?;
        match &self.outcome {
            MatchOutcome::Matched { distances, .. } => {
                for (department, distance) in distances.iter() {
                    map.serialize_entry(department, &distance)?;
                }
            }
            MatchOutcome::Invalid(_) => {
                map.serialize_entry("Message", REMEDIATION_MESSAGE)?;
            }
        }
        map.end()
    }
}

// ─────────────────────────────────────────────────────────────────
// Warnings
// ─────────────────────────────────────────────────────────────────

/// A warning raised during a batch, attributed to a candidate when it
/// concerns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWarning {
    pub code: WarningCode,
    pub candidate: Option<String>,
    pub message: &'static str,
}

/// `code` carries the same `W00N` shown on the terminal; `kind` names it.
impl Serialize for BatchWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("code", self.code.as_str())?;
        map.serialize_entry("kind", &self.code)?;
        if let Some(ref candidate) = self.candidate {
            map.serialize_entry("candidate", candidate)?;
        }
        map.serialize_entry("message", self.message)?;
        map.end()
    }
}

impl BatchWarning {
    fn new(code: WarningCode, candidate: Option<String>) -> Self {
        Self {
            code,
            candidate,
            message: code.message(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Chart data
// ─────────────────────────────────────────────────────────────────

/// Long-format row for grouped bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub candidate: String,
    pub best_department: String,
    pub department: String,
    pub distance: f64,
}

// ─────────────────────────────────────────────────────────────────
// Report
// ─────────────────────────────────────────────────────────────────

/// All rows of a batch, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    rows: Vec<RowResult>,
    departments: Vec<String>,
}

impl BatchReport {
    pub fn rows(&self) -> &[RowResult] {
        &self.rows
    }

    /// Department columns in registry order.
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Rows that produced a match; the only rows fed to charts.
    pub fn valid_rows(&self) -> Vec<&RowResult> {
        self.rows.iter().filter(|r| r.is_valid()).collect()
    }

    pub fn invalid_count(&self) -> usize {
        self.rows.len() - self.valid_rows().len()
    }

    pub fn has_valid_rows(&self) -> bool {
        self.rows.iter().any(RowResult::is_valid)
    }

    /// Per-candidate warnings in row order, then batch-level ones.
    pub fn warnings(&self) -> Vec<BatchWarning> {
        let mut warnings: Vec<BatchWarning> = self
            .rows
            .iter()
            .filter_map(|row| {
                row.outcome
                    .warning()
                    .map(|code| BatchWarning::new(code, Some(row.label.clone())))
            })
            .collect();

        if !self.has_valid_rows() {
            warnings.push(BatchWarning::new(WarningCode::EmptyValidSet, None));
        }

        warnings
    }

    /// Wide-to-long reshape of the valid rows.
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.valid_rows()
            .into_iter()
            .flat_map(|row| {
                let best = row.best_department().to_string();
                row.outcome
                    .distances()
                    .into_iter()
                    .flat_map(|d| d.iter())
                    .map(move |(department, distance)| ChartPoint {
                        candidate: row.label.clone(),
                        best_department: best.clone(),
                        department: department.to_string(),
                        distance,
                    })
            })
            .collect()
    }
}

impl Serialize for BatchReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("results", &self.rows)?;
        map.serialize_entry("valid", &self.valid_rows())?;
        map.serialize_entry("warnings", &self.warnings())?;
        map.end()
    }
}

/// Human label for the candidate at 0-based `index`.
pub fn candidate_label(index: usize) -> String {
    format!("Candidate {}", index + 1)
}

/// Match every candidate, preserving input order.
pub fn match_all(candidates: &[Candidate], registry: &PersonaRegistry) -> BatchReport {
    let rows: Vec<RowResult> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| RowResult {
            label: candidate_label(index),
            candidate: *candidate,
            outcome: match_candidate(candidate, registry),
        })
        .collect();

    let report = BatchReport {
        rows,
        departments: registry.departments().map(str::to_string).collect(),
    };

    let invalid = report.invalid_count();
    info!(
        candidates = report.rows.len(),
        valid = report.rows.len() - invalid,
        invalid,
        "Batch matched"
    );
    if !report.has_valid_rows() {
        warn!(code = %WarningCode::EmptyValidSet, "No valid candidates in batch");
    }

    report
}
