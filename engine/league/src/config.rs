//! Configuration for a league

use crate::error::LeagueError;
use crate::roster::RosterLimits;
use chrono::Datelike;
use scoring::ScoringConfig;
use serde::{Deserialize, Serialize};

/// League configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub season: i32,
    pub roster: RosterLimits,
    pub scoring: ScoringConfig,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            name: "Disc Golf Fantasy League".to_string(),
            season: chrono::Utc::now().year(),
            roster: RosterLimits::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, LeagueError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| LeagueError::InvalidConfig { message: format!("Invalid {key}") }),
        Err(_) => Ok(default),
    }
}

impl LeagueConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, LeagueError> {
        let defaults = Self::default();

        let name = std::env::var("LEAGUE_NAME").unwrap_or(defaults.name);
        let season = parse_var("LEAGUE_SEASON", defaults.season)?;
        let total_limit = parse_var("ROSTER_TOTAL_LIMIT", defaults.roster.total_limit)?;
        let active_limit = parse_var("ROSTER_ACTIVE_LIMIT", defaults.roster.active_limit)?;

        let scoring = ScoringConfig::from_env()
            .map_err(|e| LeagueError::InvalidConfig { message: e.to_string() })?;

        let config = Self { name, season, roster: RosterLimits { total_limit, active_limit }, scoring };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.name.trim().is_empty() {
            return Err(LeagueError::InvalidConfig { message: "League name is empty".to_string() });
        }
        self.roster
            .validate()
            .map_err(|e| LeagueError::InvalidConfig { message: e.to_string() })?;
        self.scoring
            .validate()
            .map_err(|e| LeagueError::InvalidConfig { message: e.to_string() })?;
        Ok(())
    }
}
