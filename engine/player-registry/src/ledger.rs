use crate::types::RegistryError;
use event_results::PdgaNumber;
use scoring::{round3, FinishStatus};
use serde::{Deserialize, Serialize};

/// One scored event in a season ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub event_name: String,
    pub score: u32,
    pub finish: FinishStatus,
}

/// A player's scores for one season, in the order events were imported
///
/// The totals are derived from the entries and rebuilt after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeasonLedgerDocument")]
pub struct SeasonLedger {
    player: PdgaNumber,
    season: i32,
    entries: Vec<LedgerEntry>,
    total_score: u64,
    event_count: usize,
    average_score: f64,
}

/// Stored form of a ledger; the totals are rebuilt from the entries on load
#[derive(Deserialize)]
struct SeasonLedgerDocument {
    player: PdgaNumber,
    season: i32,
    #[serde(default)]
    entries: Vec<LedgerEntry>,
}

impl TryFrom<SeasonLedgerDocument> for SeasonLedger {
    type Error = RegistryError;

    fn try_from(doc: SeasonLedgerDocument) -> Result<Self, Self::Error> {
        let mut ledger = SeasonLedger::new(doc.player, doc.season);
        for entry in doc.entries {
            ledger.record(&entry.event_name, entry.score, entry.finish)?;
        }
        Ok(ledger)
    }
}

impl SeasonLedger {
    pub fn new(player: PdgaNumber, season: i32) -> Self {
        Self {
            player,
            season,
            entries: Vec::new(),
            total_score: 0,
            event_count: 0,
            average_score: 0.0,
        }
    }

    /// Add an event's score; an event already in the ledger is rejected untouched
    pub(crate) fn record(
        &mut self,
        event_name: &str,
        score: u32,
        finish: FinishStatus,
    ) -> Result<&Self, RegistryError> {
        if self.contains_event(event_name) {
            return Err(RegistryError::DuplicateEvent {
                player: self.player,
                season: self.season,
                event: event_name.to_string(),
            });
        }

        self.entries.push(LedgerEntry { event_name: event_name.to_string(), score, finish });
        self.recompute();
        Ok(self)
    }

    fn recompute(&mut self) {
        self.total_score = self.entries.iter().map(|entry| u64::from(entry.score)).sum();
        self.event_count = self.entries.len();
        self.average_score = if self.event_count == 0 {
            0.0
        } else {
            round3(self.total_score as f64 / self.event_count as f64)
        };
    }

    pub fn player(&self) -> PdgaNumber {
        self.player
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn contains_event(&self, event_name: &str) -> bool {
        self.entries.iter().any(|entry| entry.event_name == event_name)
    }

    pub fn score_for(&self, event_name: &str) -> Option<u32> {
        self.entries.iter().find(|entry| entry.event_name == event_name).map(|entry| entry.score)
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// Mean score rounded to three decimals, 0 with no events
    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ledger() -> SeasonLedger {
        SeasonLedger::new(PdgaNumber(27523), 2023)
    }

    #[test]
    fn test_record_derives_totals() {
        let mut ledger = ledger();
        ledger.record("Open", 3, FinishStatus::Finished).unwrap();
        ledger.record("Classic", 1, FinishStatus::Finished).unwrap();

        assert_eq!(ledger.total_score(), 4);
        assert_eq!(ledger.event_count(), 2);
        assert_eq!(ledger.average_score(), 2.0);
        assert_eq!(ledger.score_for("Open"), Some(3));
        assert_eq!(ledger.score_for("Worlds"), None);
        let names: Vec<&str> = ledger.entries().iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["Open", "Classic"]);
    }

    #[test]
    fn test_average_rounds_to_three_decimals() {
        let mut ledger = ledger();
        ledger.record("A", 1, FinishStatus::Finished).unwrap();
        ledger.record("B", 2, FinishStatus::Finished).unwrap();
        ledger.record("C", 2, FinishStatus::Dnf).unwrap();
        assert_eq!(ledger.average_score(), 1.667);
    }

    #[test]
    fn test_duplicate_event_rejected() {
        let mut ledger = ledger();
        ledger.record("Open", 3, FinishStatus::Finished).unwrap();
        let before = ledger.clone();

        let err = ledger.record("Open", 5, FinishStatus::Finished).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateEvent {
                player: PdgaNumber(27523),
                season: 2023,
                event: "Open".to_string()
            }
        );
        assert_eq!(ledger, before);
    }

    proptest! {
        #[test]
        fn prop_derived_fields_match_entries(
            records in prop::collection::vec((0usize..8, 1u32..200), 0..40)
        ) {
            let mut ledger = ledger();
            let mut seen = std::collections::BTreeMap::new();

            for (event, score) in records {
                let name = format!("Event {event}");
                let result = ledger.record(&name, score, FinishStatus::Finished);
                if seen.contains_key(&name) {
                    prop_assert!(result.is_err());
                } else {
                    prop_assert!(result.is_ok());
                    seen.insert(name, score);
                }

                let expected_total: u64 = seen.values().map(|s| u64::from(*s)).sum();
                prop_assert_eq!(ledger.total_score(), expected_total);
                prop_assert_eq!(ledger.event_count(), seen.len());
                let expected_average = if seen.is_empty() {
                    0.0
                } else {
                    round3(expected_total as f64 / seen.len() as f64)
                };
                prop_assert_eq!(ledger.average_score(), expected_average);
            }
        }
    }
}
