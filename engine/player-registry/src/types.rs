use crate::ledger::SeasonLedger;
use event_results::names::{normalize_name, split_name};
use event_results::{PdgaNumber, PlayerProfile};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// A real-world player that fantasy teams can draft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PlayerDocument")]
pub struct Player {
    /// PDGA number (e.g., 27523)
    pub pdga_number: PdgaNumber,

    /// Normalized display name (e.g., "Paul Mcbeth")
    pub name: String,

    pub first_name: String,

    pub last_name: String,

    /// Player rating, when known
    pub rating: Option<u32>,

    /// Season year -> that season's ledger
    ledgers: BTreeMap<i32, SeasonLedger>,
}

#[derive(Deserialize)]
struct PlayerDocument {
    pdga_number: PdgaNumber,
    name: String,
    first_name: String,
    last_name: String,
    rating: Option<u32>,
    #[serde(default)]
    ledgers: BTreeMap<i32, SeasonLedger>,
}

impl TryFrom<PlayerDocument> for Player {
    type Error = String;

    fn try_from(doc: PlayerDocument) -> Result<Self, Self::Error> {
        for (season, ledger) in &doc.ledgers {
            if ledger.season() != *season || ledger.player() != doc.pdga_number {
                return Err(format!(
                    "ledger for {} in {} is filed under player {} season {}",
                    ledger.player(),
                    ledger.season(),
                    doc.pdga_number,
                    season
                ));
            }
        }

        Ok(Self {
            pdga_number: doc.pdga_number,
            name: doc.name,
            first_name: doc.first_name,
            last_name: doc.last_name,
            rating: doc.rating,
            ledgers: doc.ledgers,
        })
    }
}

impl Player {
    /// Create a new player with no recorded seasons
    pub fn new(pdga_number: impl Into<PdgaNumber>, name: &str) -> Self {
        let name = normalize_name(name);
        let (first_name, last_name) = split_name(&name);
        let (first_name, last_name) = (first_name.to_string(), last_name.to_string());

        Self {
            pdga_number: pdga_number.into(),
            name,
            first_name,
            last_name,
            rating: None,
            ledgers: BTreeMap::new(),
        }
    }

    pub fn with_rating(mut self, rating: u32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Player page on the results site
    pub fn profile_url(&self) -> String {
        format!("https://www.pdga.com/player/{}", self.pdga_number.0)
    }

    /// Ledger for a season; a season with nothing recorded yields an empty ledger
    pub fn ledger(&self, season: i32) -> Cow<'_, SeasonLedger> {
        match self.ledgers.get(&season) {
            Some(ledger) => Cow::Borrowed(ledger),
            None => Cow::Owned(SeasonLedger::new(self.pdga_number, season)),
        }
    }

    /// Seasons with at least one recorded event, oldest first
    pub fn seasons(&self) -> impl Iterator<Item = &SeasonLedger> {
        self.ledgers.values()
    }

    pub(crate) fn has_recorded(&self, season: i32, event_name: &str) -> bool {
        self.ledgers.get(&season).is_some_and(|ledger| ledger.contains_event(event_name))
    }

    /// Ledger for writing, created on first use
    pub(crate) fn ledger_mut(&mut self, season: i32) -> &mut SeasonLedger {
        let pdga_number = self.pdga_number;
        self.ledgers.entry(season).or_insert_with(|| SeasonLedger::new(pdga_number, season))
    }
}

impl From<PlayerProfile> for Player {
    fn from(profile: PlayerProfile) -> Self {
        let player = Player::new(profile.pdga_number, &profile.name);
        match profile.rating {
            Some(rating) => player.with_rating(rating),
            None => player,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Errors raised by the player registry and ledgers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Player not registered
    PlayerNotFound(PdgaNumber),

    /// No player with this name
    NameNotFound(String),

    /// PDGA number already registered
    PlayerExists(PdgaNumber),

    /// The event is already in the player's ledger for that season
    DuplicateEvent { player: PdgaNumber, season: i32, event: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::PlayerNotFound(player) => {
                write!(f, "Player {player} not found in registry")
            }
            RegistryError::NameNotFound(name) => {
                write!(f, "Player '{name}' not found in registry")
            }
            RegistryError::PlayerExists(player) => {
                write!(f, "Player {player} is already registered")
            }
            RegistryError::DuplicateEvent { player, season, event } => {
                write!(f, "{event} is already recorded for player {player} in {season}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
