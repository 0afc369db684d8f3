//! Error types for event results and the results feed

use crate::types::PdgaNumber;
use thiserror::Error;

/// Result type alias for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Player {player} appears more than once in {event}")]
    DuplicatePlayer { event: String, player: PdgaNumber },

    #[error("Placement {place} is used by more than one row in {event}")]
    DuplicatePlacement { event: String, place: u32 },

    #[error("Placement 0 is not a valid finish in {event}")]
    ZeroPlacement { event: String },

    #[error("Invalid search: {message}")]
    InvalidSearch { message: String },

    #[error("Row {row} is missing column '{column}'")]
    MissingColumn { row: usize, column: &'static str },

    #[error("Row {row} has an invalid '{column}' value: {value}")]
    InvalidColumn { row: usize, column: &'static str, value: String },

    #[error("No results found for {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FeedError {
    /// Create a new invalid search error
    pub fn invalid_search(message: impl Into<String>) -> Self {
        Self::InvalidSearch { message: message.into() }
    }
}
