//! Candidate-to-persona matching.
//!
//! Pure functions only: validation results and warnings come back as typed
//! values and are never printed here.

pub mod candidate;
pub mod engine;
pub mod outcome;

pub use candidate::{load_candidates, Candidate};
pub use engine::{match_candidate, SCORE_MAX, SCORE_MIN};
pub use outcome::{MatchOutcome, WarningCode};
