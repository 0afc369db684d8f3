//! Scoring - placement-based fantasy scores for finished events
//!
//! Turns one player's row in an [`event_results::EventResult`] into a score,
//! applying the DNF and missing-data rules.

pub mod config;
pub mod models;
pub mod policy;

pub use config::{round3, ScoringConfig};
pub use models::{DataErrorKind, FinishStatus, ScoreOutcome, ScoreStatus};
pub use policy::{PlacementScoring, ScoringPolicy};
