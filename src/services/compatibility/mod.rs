//! Compatibility Scoring
//!
//! Deterministic 0-99 match score between two sanitized profiles, with the
//! Sagothra veto reported separately from a genuine zero.

pub mod scorer;

pub use scorer::{evaluate, score, Category, CategoryScore, MatchOutcome, MAX_SCORE};
