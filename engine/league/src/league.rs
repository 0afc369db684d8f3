//! League implementation

use crate::config::LeagueConfig;
use crate::error::LeagueError;
use crate::export::{ExportRow, SeasonSummary};
use crate::roster::Roster;
use crate::team::{Team, TeamAggregate};
use crate::Result;
use event_results::{EventResult, PdgaNumber};
use player_registry::{IngestReport, Player, PlayerRegistry};
use scoring::{PlacementScoring, ScoringPolicy};
use std::collections::HashSet;
use std::fmt;
use tracing::info;

/// One season of a fantasy league: its teams, its player pool and the events scored so far
pub struct League {
    config: LeagueConfig,
    teams: Vec<Team>,
    registry: PlayerRegistry,
    policy: Box<dyn ScoringPolicy + Send + Sync>,
    ingested_events: HashSet<String>,
}

impl fmt::Debug for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("League")
            .field("name", &self.config.name)
            .field("season", &self.config.season)
            .field("teams", &self.teams.len())
            .field("players", &self.registry.len())
            .field("ingested_events", &self.ingested_events.len())
            .finish()
    }
}

impl League {
    /// Create a league that scores by placement
    pub fn new(config: LeagueConfig) -> Result<Self> {
        Self::with_policy(config, PlacementScoring)
    }

    /// Create a league with a custom scoring policy
    pub fn with_policy<P>(config: LeagueConfig, policy: P) -> Result<Self>
    where
        P: ScoringPolicy + Send + Sync + 'static,
    {
        config.validate()?;
        info!("Created league {} for the {} season", config.name, config.season);

        Ok(Self {
            config,
            teams: Vec::new(),
            registry: PlayerRegistry::new(),
            policy: Box::new(policy),
            ingested_events: HashSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn season(&self) -> i32 {
        self.config.season
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Result<&Team> {
        let name = name.trim();
        self.teams
            .iter()
            .find(|team| team.name == name)
            .ok_or_else(|| LeagueError::TeamNotFound(name.to_string()))
    }

    fn team_mut(&mut self, name: &str) -> Result<&mut Team> {
        let name = name.trim();
        self.teams
            .iter_mut()
            .find(|team| team.name == name)
            .ok_or_else(|| LeagueError::TeamNotFound(name.to_string()))
    }

    /// Create a team with an empty roster using the league's limits
    pub fn create_team(&mut self, owner: &str, name: &str) -> Result<&Team> {
        let name = name.trim();
        if self.teams.iter().any(|team| team.name == name) {
            return Err(LeagueError::TeamExists(name.to_string()));
        }

        let roster = Roster::new(self.config.roster)?;
        self.teams.push(Team::new(owner.trim(), name, roster));
        info!("{} created team {}", owner.trim(), name);

        Ok(&self.teams[self.teams.len() - 1])
    }

    pub fn register_player(&mut self, player: Player) -> Result<&Player> {
        Ok(self.registry.register(player)?)
    }

    /// Team currently rostering a player, if any
    pub fn team_of(&self, player: PdgaNumber) -> Option<&Team> {
        self.teams.iter().find(|team| team.roster().contains(player))
    }

    /// Draft a registered player onto a team
    pub fn add_to_team(&mut self, team_name: &str, player: PdgaNumber) -> Result<()> {
        self.team(team_name)?;
        self.registry.get(player)?;
        if let Some(owner) = self.team_of(player) {
            if owner.name != team_name {
                return Err(LeagueError::RosteredElsewhere { player, team: owner.name.clone() });
            }
        }

        self.team_mut(team_name)?.roster_mut().add(player)?;
        info!("{} added {}", team_name, player);
        Ok(())
    }

    pub fn drop_from_team(&mut self, team_name: &str, player: PdgaNumber) -> Result<()> {
        self.team_mut(team_name)?.roster_mut().drop(player)?;
        info!("{} dropped {}", team_name, player);
        Ok(())
    }

    /// Drop a player and fill the freed active spot from the bench
    pub fn drop_and_promote(&mut self, team_name: &str, player: PdgaNumber) -> Result<Option<PdgaNumber>> {
        let promoted = self.team_mut(team_name)?.roster_mut().drop_and_promote(player)?;
        info!("{} dropped {}", team_name, player);
        Ok(promoted)
    }

    pub fn set_active(&mut self, team_name: &str, player: PdgaNumber, active: bool) -> Result<()> {
        Ok(self.team_mut(team_name)?.roster_mut().set_active(player, active)?)
    }

    /// Score a finished event of this season for every registered player
    ///
    /// An event from another season, or one already ingested, is rejected
    /// before any ledger changes.
    pub fn ingest_event(&mut self, event: &EventResult) -> Result<IngestReport> {
        if event.season() != self.config.season {
            return Err(LeagueError::SeasonMismatch {
                event: event.name().to_string(),
                expected: self.config.season,
                found: event.season(),
            });
        }
        if self.ingested_events.contains(event.name()) {
            return Err(LeagueError::DuplicateEvent(event.name().to_string()));
        }

        let report =
            self.registry.apply_event_to_all(event, &*self.policy, self.config.scoring.verbose)?;
        self.ingested_events.insert(event.name().to_string());
        Ok(report)
    }

    pub fn has_ingested(&self, event_name: &str) -> bool {
        self.ingested_events.contains(event_name)
    }

    /// Season statistics for one team
    pub fn team_aggregate(&self, team_name: &str, active_only: bool) -> Result<TeamAggregate> {
        let team = self.team(team_name)?;
        Ok(team.aggregate(&self.registry, self.config.season, active_only, &self.config.scoring))
    }

    /// Every recorded score of every registered player, for persistence
    ///
    /// Ordered by PDGA number, then season, then import order.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.registry
            .players()
            .flat_map(|player| {
                player.seasons().flat_map(move |ledger| {
                    ledger.entries().iter().map(move |entry| ExportRow {
                        name: player.name.clone(),
                        pdga_number: player.pdga_number,
                        event_name: entry.event_name.clone(),
                        place: entry.score,
                        event_year: ledger.season(),
                        event_status: entry.finish.to_string(),
                    })
                })
            })
            .collect()
    }

    /// This season's line for every registered player
    pub fn season_summaries(&self) -> Vec<SeasonSummary> {
        self.registry
            .players()
            .map(|player| {
                let ledger = player.ledger(self.config.season);
                SeasonSummary {
                    name: player.name.clone(),
                    pdga_number: player.pdga_number,
                    season: self.config.season,
                    number_of_events: ledger.event_count(),
                    total_score: ledger.total_score(),
                    average_score: ledger.average_score(),
                    weighted_average: self
                        .config
                        .scoring
                        .weighted_average(ledger.total_score(), ledger.event_count()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use crate::roster::RosterLimits;
    use event_results::{FeedRow, Outcome};
    use player_registry::RegistryError;

    const MCBETH: PdgaNumber = PdgaNumber(27523);
    const HEIMBURG: PdgaNumber = PdgaNumber(44382);
    const MCMAHON: PdgaNumber = PdgaNumber(38008);

    fn create_test_league() -> League {
        let config = LeagueConfig {
            name: "Test League".to_string(),
            season: 2023,
            roster: RosterLimits::new(2, 1).unwrap(),
            ..Default::default()
        };
        let mut league = League::new(config).unwrap();
        league.register_player(Player::new(27523u32, "Paul McBeth")).unwrap();
        league.register_player(Player::new(44382u32, "Calvin Heimburg")).unwrap();
        league.register_player(Player::new(38008u32, "Eagle McMahon")).unwrap();
        league.create_team("Sam", "Chain Reaction").unwrap();
        league.create_team("Alex", "Tree Kickers").unwrap();
        league
    }

    fn event(name: &str, season: i32) -> EventResult {
        EventResult::new(
            name,
            season,
            vec![
                FeedRow::new(44382u32, "Calvin Heimburg", Outcome::Placed(1)),
                FeedRow::new(38008u32, "Eagle McMahon", Outcome::Placed(2)),
                FeedRow::new(27523u32, "Paul McBeth", Outcome::Dnf),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_create_team_rejects_duplicate_name() {
        let mut league = create_test_league();
        assert!(matches!(league.create_team("Kim", "Tree Kickers"), Err(LeagueError::TeamExists(_))));
        assert_eq!(league.teams().len(), 2);
    }

    #[test]
    fn test_team_names_are_trimmed_on_lookup() {
        let mut league = create_test_league();
        league.create_team("Kim", " Disc Dogs ").unwrap();
        assert!(matches!(league.create_team("Lee", "Disc Dogs"), Err(LeagueError::TeamExists(_))));

        league.add_to_team(" Disc Dogs ", MCBETH).unwrap();
        assert!(league.team("Disc Dogs").unwrap().roster().contains(MCBETH));
        assert_eq!(league.team_of(MCBETH).unwrap().name, "Disc Dogs");
    }

    #[test]
    fn test_add_to_team() {
        let mut league = create_test_league();
        league.add_to_team("Chain Reaction", MCBETH).unwrap();
        league.add_to_team("Chain Reaction", HEIMBURG).unwrap();

        let roster = league.team("Chain Reaction").unwrap().roster();
        assert_eq!(roster.active_members(), vec![MCBETH]);
        assert_eq!(roster.bench(), vec![HEIMBURG]);

        let err = league.add_to_team("Chain Reaction", MCMAHON).unwrap_err();
        assert!(matches!(err, LeagueError::Roster(RosterError::RosterFull { limit: 2 })));
    }

    #[test]
    fn test_player_on_one_team_only() {
        let mut league = create_test_league();
        league.add_to_team("Chain Reaction", MCBETH).unwrap();

        let err = league.add_to_team("Tree Kickers", MCBETH).unwrap_err();
        assert!(matches!(err, LeagueError::RosteredElsewhere { team, .. } if team == "Chain Reaction"));

        let err = league.add_to_team("Chain Reaction", MCBETH).unwrap_err();
        assert!(matches!(err, LeagueError::Roster(RosterError::AlreadyRostered(_))));

        league.drop_from_team("Chain Reaction", MCBETH).unwrap();
        league.add_to_team("Tree Kickers", MCBETH).unwrap();
        assert_eq!(league.team_of(MCBETH).unwrap().name, "Tree Kickers");
    }

    #[test]
    fn test_add_unknown_player_or_team() {
        let mut league = create_test_league();
        assert!(matches!(
            league.add_to_team("Chain Reaction", PdgaNumber(1)),
            Err(LeagueError::Registry(RegistryError::PlayerNotFound(_)))
        ));
        assert!(matches!(league.add_to_team("Nobody", MCBETH), Err(LeagueError::TeamNotFound(_))));
    }

    #[test]
    fn test_drop_non_member() {
        let mut league = create_test_league();
        league.add_to_team("Chain Reaction", MCBETH).unwrap();
        let err = league.drop_from_team("Chain Reaction", HEIMBURG).unwrap_err();
        assert!(matches!(err, LeagueError::Roster(RosterError::NotRostered(_))));
        assert_eq!(league.team("Chain Reaction").unwrap().roster().members(), vec![MCBETH]);
    }

    #[test]
    fn test_drop_and_promote_through_league() {
        let mut league = create_test_league();
        league.add_to_team("Chain Reaction", MCBETH).unwrap();
        league.add_to_team("Chain Reaction", HEIMBURG).unwrap();

        assert_eq!(league.drop_and_promote("Chain Reaction", MCBETH).unwrap(), Some(HEIMBURG));
        assert!(league.team("Chain Reaction").unwrap().roster().is_active(HEIMBURG));
    }

    #[test]
    fn test_set_active_through_league() {
        let mut league = create_test_league();
        league.add_to_team("Chain Reaction", MCBETH).unwrap();
        league.add_to_team("Chain Reaction", HEIMBURG).unwrap();

        assert!(league.set_active("Chain Reaction", HEIMBURG, true).is_err());
        league.set_active("Chain Reaction", MCBETH, false).unwrap();
        league.set_active("Chain Reaction", HEIMBURG, true).unwrap();
        assert_eq!(league.team("Chain Reaction").unwrap().roster().active_members(), vec![HEIMBURG]);
    }

    #[test]
    fn test_ingest_event() {
        let mut league = create_test_league();
        let report = league.ingest_event(&event("Open", 2023)).unwrap();
        assert_eq!(report.scored, 3);
        assert!(league.has_ingested("Open"));

        let mcbeth = league.registry().get(MCBETH).unwrap().ledger(2023);
        assert_eq!(mcbeth.score_for("Open"), Some(3));
    }

    #[test]
    fn test_ingest_rejects_duplicates_and_other_seasons() {
        let mut league = create_test_league();
        league.ingest_event(&event("Open", 2023)).unwrap();

        assert!(matches!(league.ingest_event(&event("Open", 2023)), Err(LeagueError::DuplicateEvent(_))));
        assert!(matches!(
            league.ingest_event(&event("Classic", 2022)),
            Err(LeagueError::SeasonMismatch { expected: 2023, found: 2022, .. })
        ));

        let heimburg = league.registry().get(HEIMBURG).unwrap().ledger(2023);
        assert_eq!(heimburg.event_count(), 1);
        assert_eq!(heimburg.total_score(), 1);
    }

    #[test]
    fn test_team_aggregate() {
        let mut league = create_test_league();
        league.add_to_team("Chain Reaction", MCBETH).unwrap();
        league.add_to_team("Chain Reaction", HEIMBURG).unwrap();
        league.ingest_event(&event("Open", 2023)).unwrap();
        league.ingest_event(&event("Classic", 2023)).unwrap();

        let active = league.team_aggregate("Chain Reaction", true).unwrap();
        assert_eq!(active.total_score, 6);
        assert_eq!(active.event_count, 2);
        assert_eq!(active.weighted_average, Some(6.0));

        let all = league.team_aggregate("Chain Reaction", false).unwrap();
        assert_eq!(all.total_score, 8);
        assert_eq!(all.event_count, 4);
        assert_eq!(all.average_score, 2.0);

        let empty = league.team_aggregate("Tree Kickers", false).unwrap();
        assert_eq!(empty.weighted_average, None);
    }

    #[test]
    fn test_export_rows() {
        let mut league = create_test_league();
        league.ingest_event(&event("Open", 2023)).unwrap();
        league.ingest_event(&event("Classic", 2023)).unwrap();

        let rows = league.export_rows();
        assert_eq!(rows.len(), 6);

        let first = &rows[0];
        assert_eq!(first.pdga_number, MCBETH);
        assert_eq!(first.name, "Paul Mcbeth");
        assert_eq!(first.event_name, "Open");
        assert_eq!(first.place, 3);
        assert_eq!(first.event_year, 2023);
        assert_eq!(first.event_status, "DNF");
        assert_eq!(rows[1].event_name, "Classic");

        let heimburg: Vec<&ExportRow> = rows.iter().filter(|r| r.pdga_number == HEIMBURG).collect();
        assert!(heimburg.iter().all(|r| r.place == 1 && r.event_status == "Finished"));
    }

    #[test]
    fn test_season_summaries() {
        let mut league = create_test_league();
        league.ingest_event(&event("Open", 2023)).unwrap();

        let summaries = league.season_summaries();
        assert_eq!(summaries.len(), 3);
        let mcmahon = summaries.iter().find(|s| s.pdga_number == MCMAHON).unwrap();
        assert_eq!(mcmahon.number_of_events, 1);
        assert_eq!(mcmahon.total_score, 2);
        assert_eq!(mcmahon.weighted_average, Some(4.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LeagueConfig {
            roster: RosterLimits { total_limit: 1, active_limit: 3 },
            ..Default::default()
        };
        assert!(matches!(League::new(config), Err(LeagueError::InvalidConfig { .. })));
    }
}
