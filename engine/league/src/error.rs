//! Error types for rosters and leagues

use event_results::PdgaNumber;
use player_registry::RegistryError;
use thiserror::Error;

/// Rejected roster operations; the roster is unchanged when one is returned
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Roster is full ({limit} players)")]
    RosterFull { limit: usize },

    #[error("Player {0} is already on the roster")]
    AlreadyRostered(PdgaNumber),

    #[error("Player {0} is not on the roster")]
    NotRostered(PdgaNumber),

    #[error("Active lineup is full ({limit} players)")]
    ActiveLimitExceeded { limit: usize },

    #[error("Invalid roster limits: total {total_limit}, active {active_limit}")]
    InvalidLimits { total_limit: usize, active_limit: usize },
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Team already exists: {0}")]
    TeamExists(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Player {player} is already rostered by {team}")]
    RosteredElsewhere { player: PdgaNumber, team: String },

    #[error("Event {event} belongs to season {found}, league season is {expected}")]
    SeasonMismatch { event: String, expected: i32, found: i32 },

    #[error("Event already ingested: {0}")]
    DuplicateEvent(String),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
