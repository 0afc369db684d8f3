use crate::types::{Player, RegistryError};
use event_results::{normalize_name, EventResult, PdgaNumber};
use scoring::{ScoreOutcome, ScoreStatus, ScoringPolicy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts from applying one event to every registered player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub event_name: String,
    pub season: i32,
    pub scored: usize,
    pub not_played: usize,
    pub data_errors: usize,
}

/// Player Registry - every draftable player and their season ledgers
///
/// Ledgers only change through [`PlayerRegistry::apply_event`] and
/// [`PlayerRegistry::apply_event_to_all`], which run the scoring policy first.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    /// Map from PDGA number to player, ordered by number
    players: BTreeMap<PdgaNumber, Player>,

    /// Map from normalized name to PDGA number (for quick lookup)
    numbers_by_name: HashMap<String, PdgaNumber>,
}

impl PlayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { players: BTreeMap::new(), numbers_by_name: HashMap::new() }
    }

    /// Load players from a JSON array of player records
    pub async fn load_from_file<P: AsRef<Path>>(
        &mut self,
        file_path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        info!("Loading player data from: {:?}", file_path.as_ref());

        // Read and parse the JSON file
        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let players: Vec<Player> = serde_json::from_str(&json_content)?;

        info!("Loaded {} players from file", players.len());

        for player in players {
            self.register(player)?;
        }

        Ok(())
    }

    /// Add a player; a PDGA number can only be registered once
    pub fn register(&mut self, player: Player) -> Result<&Player, RegistryError> {
        let number = player.pdga_number;
        if self.players.contains_key(&number) {
            return Err(RegistryError::PlayerExists(number));
        }

        if let Some(existing) = self.numbers_by_name.get(&player.name) {
            warn!(
                "Name {} already belongs to {}, lookups by name keep returning that player",
                player.name, existing
            );
        } else {
            self.numbers_by_name.insert(player.name.clone(), number);
        }

        debug!("Registered {} ({})", player.name, number);
        Ok(self.players.entry(number).or_insert(player))
    }

    /// Get a player by PDGA number
    pub fn get(&self, pdga_number: PdgaNumber) -> Result<&Player, RegistryError> {
        self.players.get(&pdga_number).ok_or(RegistryError::PlayerNotFound(pdga_number))
    }

    /// Get a player by name, matched after normalization
    pub fn get_by_name(&self, name: &str) -> Result<&Player, RegistryError> {
        let number = self
            .numbers_by_name
            .get(&normalize_name(name))
            .ok_or_else(|| RegistryError::NameNotFound(name.to_string()))?;

        self.get(*number)
    }

    pub fn contains(&self, pdga_number: PdgaNumber) -> bool {
        self.players.contains_key(&pdga_number)
    }

    /// All players, ordered by PDGA number
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Search for players by partial name match
    pub fn search_players(&self, query: &str) -> Vec<&Player> {
        let query_lower = query.to_lowercase();
        self.players.values().filter(|player| player.name.to_lowercase().contains(&query_lower)).collect()
    }

    /// Score one player against a finished event and record the result
    ///
    /// Only an `Ok` score touches the ledger (of the event's season). Players
    /// who did not play and unreadable rows are logged and skipped.
    pub fn apply_event<P: ScoringPolicy + ?Sized>(
        &mut self,
        pdga_number: PdgaNumber,
        event: &EventResult,
        policy: &P,
        verbose: bool,
    ) -> Result<ScoreStatus, RegistryError> {
        let player =
            self.players.get_mut(&pdga_number).ok_or(RegistryError::PlayerNotFound(pdga_number))?;

        let outcome = policy.score(event, pdga_number, verbose);
        // not-played and data-error outcomes are logged by the policy
        if let ScoreOutcome::Scored { score, finish } = outcome {
            let ledger = player.ledger_mut(event.season()).record(event.name(), score, finish)?;
            let (total, count) = (ledger.total_score(), ledger.event_count());
            debug!(
                "{} scored {} in {}, season total {} over {} events",
                player.name, score, event, total, count
            );
        }

        Ok(outcome.status())
    }

    /// Apply an event to every registered player
    ///
    /// Nothing is recorded if any player already has the event for that
    /// season. Per-row data errors are counted, never fatal.
    pub fn apply_event_to_all<P: ScoringPolicy + ?Sized>(
        &mut self,
        event: &EventResult,
        policy: &P,
        verbose: bool,
    ) -> Result<IngestReport, RegistryError> {
        if let Some(player) = self.players.values().find(|p| p.has_recorded(event.season(), event.name())) {
            return Err(RegistryError::DuplicateEvent {
                player: player.pdga_number,
                season: event.season(),
                event: event.name().to_string(),
            });
        }

        let mut report = IngestReport {
            event_name: event.name().to_string(),
            season: event.season(),
            ..Default::default()
        };

        let numbers: Vec<PdgaNumber> = self.players.keys().copied().collect();
        for number in numbers {
            match self.apply_event(number, event, policy, verbose)? {
                ScoreStatus::Ok => report.scored += 1,
                ScoreStatus::NotPlayed => report.not_played += 1,
                ScoreStatus::DataError(_) => report.data_errors += 1,
            }
        }

        info!(
            "Applied {}: {} scored, {} did not play, {} data errors",
            event, report.scored, report.not_played, report.data_errors
        );
        Ok(report)
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
