use crate::roster::Roster;
use player_registry::PlayerRegistry;
use scoring::{round3, ScoringConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Season statistics summed over a team's players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAggregate {
    pub total_score: u64,
    pub event_count: usize,
    pub average_score: f64,
    /// `None` when the counted players have no events
    pub weighted_average: Option<f64>,
}

impl fmt::Display for TeamAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of events: {}", self.event_count)?;
        writeln!(f, "Total score: {}", self.total_score)?;
        writeln!(f, "Average score: {}", self.average_score)?;
        match self.weighted_average {
            Some(weighted) => write!(f, "Weighted average: {weighted}"),
            None => write!(f, "Weighted average: No events"),
        }
    }
}

/// A fantasy team and its roster
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub owner: String,
    pub name: String,
    roster: Roster,
}

impl Team {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, roster: Roster) -> Self {
        Self { owner: owner.into(), name: name.into(), roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Sum the season ledgers of the whole roster, or only of the active lineup
    pub fn aggregate(
        &self,
        registry: &PlayerRegistry,
        season: i32,
        active_only: bool,
        scoring: &ScoringConfig,
    ) -> TeamAggregate {
        let members = if active_only { self.roster.active_members() } else { self.roster.members() };

        let mut total_score = 0u64;
        let mut event_count = 0usize;
        for number in members {
            match registry.get(number) {
                Ok(player) => {
                    let ledger = player.ledger(season);
                    total_score += ledger.total_score();
                    event_count += ledger.event_count();
                }
                Err(e) => warn!("Team {} rosters an unknown player: {}", self.name, e),
            }
        }

        let average_score =
            if event_count == 0 { 0.0 } else { round3(total_score as f64 / event_count as f64) };

        TeamAggregate {
            total_score,
            event_count,
            average_score,
            weighted_average: scoring.weighted_average(total_score, event_count),
        }
    }
}
