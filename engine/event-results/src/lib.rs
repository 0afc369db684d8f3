//! Event Results - normalized disc golf leaderboards
//!
//! This crate defines the immutable [`EventResult`] the scoring engine
//! consumes, the typed searches used to locate events and players, and the
//! [`ResultsFeed`] seam through which finished results enter the system.

pub mod error;
pub mod feed;
pub mod finder;
pub mod names;
pub mod search;
pub mod types;

pub use error::{FeedError, Result};
pub use feed::{JsonFileFeed, ResultsFeed};
pub use finder::{EventFinder, EventListing, InMemoryRows, PlayerFinder, PlayerProfile, ResultRows};
pub use names::normalize_name;
pub use search::{Classification, EventSearch, PlayerSearch, Tier};
pub use types::{EventResult, FeedRow, Outcome, PdgaNumber};
