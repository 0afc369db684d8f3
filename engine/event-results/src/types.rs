use crate::error::{FeedError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// PDGA membership number, the stable identity of a player across events and seasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PdgaNumber(pub u32);

impl fmt::Display for PdgaNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PdgaNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// How a single leaderboard row ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawOutcome", into = "RawOutcome")]
pub enum Outcome {
    /// Finishing place, 1 = winner
    Placed(u32),
    /// Did not finish
    Dnf,
    /// The row could not be read
    Error,
}

impl Outcome {
    pub fn placement(&self) -> Option<u32> {
        match self {
            Outcome::Placed(place) => Some(*place),
            _ => None,
        }
    }

    pub fn is_dnf(&self) -> bool {
        matches!(self, Outcome::Dnf)
    }
}

impl FromStr for Outcome {
    type Err = std::convert::Infallible;

    /// Never fails: anything that is neither a positive place nor `DNF` is an `Error` row.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let cell = s.trim();
        if cell.eq_ignore_ascii_case("DNF") {
            return Ok(Outcome::Dnf);
        }
        match cell.parse::<u32>() {
            Ok(place) if place > 0 => Ok(Outcome::Placed(place)),
            _ => Ok(Outcome::Error),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Placed(place) => write!(f, "{place}"),
            Outcome::Dnf => write!(f, "DNF"),
            Outcome::Error => write!(f, "ERROR"),
        }
    }
}

/// Wire form of an outcome: a bare number, a status code, or anything else
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawOutcome {
    Place(u32),
    Code(String),
    Other(serde_json::Value),
}

impl From<RawOutcome> for Outcome {
    fn from(raw: RawOutcome) -> Self {
        match raw {
            RawOutcome::Place(0) => Outcome::Error,
            RawOutcome::Place(place) => Outcome::Placed(place),
            RawOutcome::Code(code) => code.parse().unwrap_or(Outcome::Error),
            RawOutcome::Other(_) => Outcome::Error,
        }
    }
}

impl From<Outcome> for RawOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Placed(place) => RawOutcome::Place(place),
            other => RawOutcome::Code(other.to_string()),
        }
    }
}

/// One leaderboard row as delivered by a results feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRow {
    pub pdga_number: PdgaNumber,
    /// Player name as printed on the leaderboard
    pub name: String,
    /// Player rating at the time of the event
    pub rating: Option<u32>,
    pub outcome: Outcome,
}

impl FeedRow {
    pub fn new(pdga_number: impl Into<PdgaNumber>, name: impl Into<String>, outcome: Outcome) -> Self {
        Self { pdga_number: pdga_number.into(), name: name.into(), rating: None, outcome }
    }

    pub fn with_rating(mut self, rating: u32) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Normalized outcome of one finished event
///
/// Rows keep leaderboard order. Construction validates that every player
/// appears once and that numeric placements are unique and positive; the
/// value is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventResultDocument")]
pub struct EventResult {
    name: String,
    season: i32,
    event_number: Option<u32>,
    fetched_at: DateTime<Utc>,
    rows: Vec<FeedRow>,
}

#[derive(Deserialize)]
struct EventResultDocument {
    name: String,
    season: i32,
    #[serde(default)]
    event_number: Option<u32>,
    #[serde(default = "Utc::now")]
    fetched_at: DateTime<Utc>,
    rows: Vec<FeedRow>,
}

impl TryFrom<EventResultDocument> for EventResult {
    type Error = FeedError;

    fn try_from(doc: EventResultDocument) -> Result<Self> {
        let mut result = EventResult::new(doc.name, doc.season, doc.rows)?;
        result.event_number = doc.event_number;
        result.fetched_at = doc.fetched_at;
        Ok(result)
    }
}

impl EventResult {
    /// Validate and build an event result
    pub fn new(name: impl Into<String>, season: i32, rows: Vec<FeedRow>) -> Result<Self> {
        let name = name.into().trim().to_string();

        let mut players = HashSet::with_capacity(rows.len());
        let mut places = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !players.insert(row.pdga_number) {
                return Err(FeedError::DuplicatePlayer { event: name, player: row.pdga_number });
            }
            // `Placed(0)` can only come from direct construction
            if let Outcome::Placed(place) = row.outcome {
                if place == 0 {
                    return Err(FeedError::ZeroPlacement { event: name });
                }
                if !places.insert(place) {
                    return Err(FeedError::DuplicatePlacement { event: name, place });
                }
            }
        }

        Ok(Self { name, season, event_number: None, fetched_at: Utc::now(), rows })
    }

    /// Attach the results site's event number
    pub fn with_event_number(mut self, event_number: u32) -> Self {
        self.event_number = Some(event_number);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    pub fn event_number(&self) -> Option<u32> {
        self.event_number
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn rows(&self) -> &[FeedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the row for a player, if they played
    pub fn row_for(&self, player: PdgaNumber) -> Option<&FeedRow> {
        self.rows.iter().find(|row| row.pdga_number == player)
    }

    /// Worst numeric placement in the event, `None` when no row finished
    pub fn max_placement(&self) -> Option<u32> {
        self.rows.iter().filter_map(|row| row.outcome.placement()).max()
    }

    /// Number of rows that did not finish
    pub fn dnf_count(&self) -> usize {
        self.rows.iter().filter(|row| row.outcome.is_dnf()).count()
    }
}

impl fmt::Display for EventResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.season)
    }
}
