//! Batch runner: matches a list of candidates and aggregates the rows.

pub mod input;
pub mod runner;

pub use input::gather_candidates;
pub use runner::{match_all, BatchReport, BatchWarning};
