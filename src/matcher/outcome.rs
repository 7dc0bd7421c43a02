//! Match outcomes, invalid-input reasons and warning codes.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::persona::Trait;

// ─────────────────────────────────────────────────────────────────
// Warning Codes
// ─────────────────────────────────────────────────────────────────

/// Non-fatal conditions surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningCode {
    /// A candidate scored exactly 0 on every trait.
    DegenerateZeroProfile,
    /// No candidate in a batch produced a valid match.
    EmptyValidSet,
}

impl WarningCode {
    /// String code (e.g., "W001")
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::DegenerateZeroProfile => "W001",
            WarningCode::EmptyValidSet => "W002",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WarningCode::DegenerateZeroProfile => {
                "All scores are 0, which may not be a valid profile. Please adjust scores."
            }
            WarningCode::EmptyValidSet => "No valid candidate profiles to display.",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────
// Invalid Reason
// ─────────────────────────────────────────────────────────────────

/// Why a candidate could not be matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InvalidReason {
    /// A score lies outside [0, 100] (or is NaN).
    OutOfRangeScore {
        #[serde(rename = "trait")]
        score_trait: Trait,
        score: f64,
    },
    /// Every score is exactly 0.
    DegenerateZeroProfile,
}

impl InvalidReason {
    /// Warning raised alongside this reason, if any.
    pub fn warning(&self) -> Option<WarningCode> {
        match self {
            InvalidReason::OutOfRangeScore { .. } => None,
            InvalidReason::DegenerateZeroProfile => Some(WarningCode::DegenerateZeroProfile),
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::OutOfRangeScore { score_trait, score } => {
                write!(f, "{} score {} is outside 0-100", score_trait, score)
            }
            InvalidReason::DegenerateZeroProfile => write!(f, "all scores are 0"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Distance Map
// ─────────────────────────────────────────────────────────────────

/// Distance from a candidate to each persona, in registry order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistanceMap {
    entries: Vec<(String, f64)>,
}

impl DistanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, department: impl Into<String>, distance: f64) {
        self.entries.push((department.into(), distance));
    }

    pub fn get(&self, department: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(d, _)| d == department)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(d, v)| (d.as_str(), *v))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Smallest distance; the earliest entry wins ties.
    pub fn nearest(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (department, distance) in self.iter() {
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((department, distance)),
            }
        }
        best
    }
}

impl Serialize for DistanceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (department, distance) in &self.entries {
            map.serialize_entry(department, distance)?;
        }
        map.end()
    }
}

// ─────────────────────────────────────────────────────────────────
// Match Outcome
// ─────────────────────────────────────────────────────────────────

/// Result of matching one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched {
        best_department: String,
        distances: DistanceMap,
    },
    Invalid(InvalidReason),
}

impl MatchOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    pub fn best_department(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched {
                best_department, ..
            } => Some(best_department),
            MatchOutcome::Invalid(_) => None,
        }
    }

    pub fn distances(&self) -> Option<&DistanceMap> {
        match self {
            MatchOutcome::Matched { distances, .. } => Some(distances),
            MatchOutcome::Invalid(_) => None,
        }
    }

    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::Invalid(reason) => Some(*reason),
        }
    }

    pub fn warning(&self) -> Option<WarningCode> {
        self.invalid_reason().and_then(|r| r.warning())
    }
}
