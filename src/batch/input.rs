//! Assembling a batch of candidates from CLI flags and files.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::matcher::{load_candidates, Candidate};

/// Collect the candidates for one run.
///
/// File candidates come first, then `-c` flags, each in their given order.
/// When neither supplies any, the single `default` profile is used.
pub fn gather_candidates(
    input_file: Option<&Path>,
    from_args: &[Candidate],
    default: Candidate,
    max_candidates: usize,
) -> Result<Vec<Candidate>> {
    let mut candidates = match input_file {
        Some(path) => load_candidates(path)?,
        None => Vec::new(),
    };
    candidates.extend_from_slice(from_args);

    if candidates.is_empty() {
        debug!(candidate = %default, "No candidates given, using default profile");
        candidates.push(default);
    }

    if candidates.len() > max_candidates {
        return Err(Error::TooManyCandidates {
            count: candidates.len(),
            max: max_candidates,
        });
    }

    Ok(candidates)
}
