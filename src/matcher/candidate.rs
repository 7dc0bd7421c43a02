//! Candidate input parsing.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::persona::TraitVector;

/// A candidate's trait scores. Scores are accepted as any real number;
/// range checks happen at match time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate {
    pub scores: TraitVector,
}

impl Candidate {
    #[cfg(test)]
    pub const fn new(diplomatic: f64, balanced: f64, sociable: f64, innovative: f64) -> Self {
        Self {
            scores: TraitVector::new(diplomatic, balanced, sociable, innovative),
        }
    }
}

impl From<TraitVector> for Candidate {
    fn from(scores: TraitVector) -> Self {
        Self { scores }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scores)
    }
}

/// Parses `diplomatic,balanced,sociable,innovative`.
impl FromStr for Candidate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::malformed_candidate(
                s,
                format!("expected 4 comma-separated scores, got {}", parts.len()),
            ));
        }

        let mut scores = [0.0; 4];
        for (slot, part) in scores.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| Error::malformed_candidate(s, format!("'{}' is not a number", part)))?;
        }

        Ok(TraitVector::from_array(scores).into())
    }
}

#[derive(Debug, Deserialize)]
struct CandidateFile {
    #[serde(default, rename = "candidate")]
    candidates: Vec<Candidate>,
}

/// Read `[[candidate]]` tables from a TOML file, in file order.
pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file: CandidateFile = toml::from_str(&content).map_err(|e| Error::config_parse(path, e))?;
    debug!(
        path = %path.display(),
        count = file.candidates.len(),
        "Candidates loaded from file"
    );
    Ok(file.candidates)
}
