//! Core types for the persona system.
//!
//! A persona is a department's ideal profile: a point in the four-trait
//! space plus business metrics that are shown alongside it but never used
//! for matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────────────────────────

/// The four personality traits, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Diplomatic,
    Balanced,
    Sociable,
    Innovative,
}

impl Trait {
    /// All traits in the fixed order used by trait vectors.
    pub fn all() -> &'static [Trait; 4] {
        &[
            Trait::Diplomatic,
            Trait::Balanced,
            Trait::Sociable,
            Trait::Innovative,
        ]
    }

    /// Key used in TOML files.
    pub fn key(&self) -> &'static str {
        match self {
            Trait::Diplomatic => "diplomatic",
            Trait::Balanced => "balanced",
            Trait::Sociable => "sociable",
            Trait::Innovative => "innovative",
        }
    }

    /// Column heading.
    pub fn display_name(&self) -> &'static str {
        match self {
            Trait::Diplomatic => "Diplomatic",
            Trait::Balanced => "Balanced",
            Trait::Sociable => "Sociable",
            Trait::Innovative => "Innovative",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diplomatic" => Ok(Trait::Diplomatic),
            "balanced" => Ok(Trait::Balanced),
            "sociable" => Ok(Trait::Sociable),
            "innovative" => Ok(Trait::Innovative),
            _ => Err(format!(
                "Unknown trait '{}'. Valid: diplomatic, balanced, sociable, innovative",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Trait Vector
// ─────────────────────────────────────────────────────────────────

/// Ordered (diplomatic, balanced, sociable, innovative) scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitVector {
    pub diplomatic: f64,
    pub balanced: f64,
    pub sociable: f64,
    pub innovative: f64,
}

impl TraitVector {
    pub const fn new(diplomatic: f64, balanced: f64, sociable: f64, innovative: f64) -> Self {
        Self {
            diplomatic,
            balanced,
            sociable,
            innovative,
        }
    }

    pub fn from_array(scores: [f64; 4]) -> Self {
        Self::new(scores[0], scores[1], scores[2], scores[3])
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.diplomatic, self.balanced, self.sociable, self.innovative]
    }

    pub fn get(&self, t: Trait) -> f64 {
        self.to_array()[t.index()]
    }

    /// (trait, score) pairs in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        Trait::all().iter().map(move |t| (*t, self.get(*t)))
    }

    /// Euclidean (L2) distance, unweighted.
    pub fn distance(&self, other: &TraitVector) -> f64 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Display for TraitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.diplomatic, self.balanced, self.sociable, self.innovative
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// A department's reference profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Persona {
    /// Department name, unique within a registry.
    pub department: String,

    /// Trait scores used for matching.
    pub traits: TraitVector,

    /// Display-only business metrics, in declaration order.
    pub metrics: Vec<(String, f64)>,
}

impl Persona {
    pub fn new(department: impl Into<String>, traits: TraitVector) -> Self {
        Self {
            department: department.into(),
            traits,
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.push((name.into(), value));
        self
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
