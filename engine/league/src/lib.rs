//! League - fantasy teams, rosters and season aggregation
//!
//! This crate provides the [`League`] which owns the teams of one season and
//! the shared player registry, routes finished events through the scoring
//! policy, enforces roster limits and exports scored rows for persistence.

pub mod config;
pub mod error;
pub mod export;
pub mod league;
pub mod roster;
pub mod team;

pub use config::LeagueConfig;
pub use error::{LeagueError, RosterError};
pub use league::League;

// Re-export commonly used types
pub use export::{ExportRow, SeasonSummary};
pub use roster::{Roster, RosterLimits};
pub use team::{Team, TeamAggregate};

// Result type alias
pub type Result<T> = std::result::Result<T, LeagueError>;
