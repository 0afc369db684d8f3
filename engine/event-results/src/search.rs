//! Typed search parameters for the results site
//!
//! Each search kind declares its fields up front and is validated when it is
//! built, so a feed implementation never sees a half-formed query.

use crate::error::{FeedError, Result};
use crate::names::{normalize_name, split_name};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_EVENT_SEARCH_URL: &str = "https://www.pdga.com/tour/search";
pub const DEFAULT_PLAYER_SEARCH_URL: &str = "https://www.pdga.com/players";

/// Earliest season the results site has records for
const FIRST_SEASON: i32 = 1976;

/// Event tier on the professional tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Elite Series
    #[serde(rename = "ES")]
    EliteSeries,
    #[serde(rename = "M")]
    Major,
    A,
    B,
    C,
}

impl Tier {
    pub fn code(&self) -> &'static str {
        match self {
            Tier::EliteSeries => "ES",
            Tier::Major => "M",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Pro,
    #[serde(rename = "Am")]
    Amateur,
}

impl Classification {
    pub fn code(&self) -> &'static str {
        match self {
            Classification::Pro => "Pro",
            Classification::Amateur => "Am",
        }
    }
}

/// Search for one named event in one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSearch {
    name: String,
    year: i32,
    tiers: Vec<Tier>,
    classifications: Vec<Classification>,
}

impl EventSearch {
    /// Search the default tiers (Elite Series and Majors) for pro events
    pub fn new(name: &str, year: i32) -> Result<Self> {
        Self::with_filters(name, year, vec![Tier::EliteSeries, Tier::Major], vec![Classification::Pro])
    }

    pub fn with_filters(
        name: &str,
        year: i32,
        tiers: Vec<Tier>,
        classifications: Vec<Classification>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FeedError::invalid_search("event name is empty"));
        }
        if year < FIRST_SEASON {
            return Err(FeedError::invalid_search(format!("season {year} predates {FIRST_SEASON}")));
        }
        if tiers.is_empty() {
            return Err(FeedError::invalid_search("at least one tier is required"));
        }
        if classifications.is_empty() {
            return Err(FeedError::invalid_search("at least one classification is required"));
        }

        Ok(Self { name: name.to_string(), year, tiers, classifications })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    /// Query URL restricted to the event's calendar year
    pub fn query_url(&self, base_url: &str) -> String {
        let tiers =
            self.tiers.iter().map(|t| format!("Tier[]={}", t.code())).collect::<Vec<_>>().join("&");
        let classifications = self
            .classifications
            .iter()
            .map(|c| format!("Classification[]={}", c.code()))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{base_url}?OfficialName={}&date_filter[min][date]={year}-01-01&date_filter[max][date]={year}-12-31&{tiers}&{classifications}",
            self.name.replace(' ', "%20"),
            year = self.year,
        )
    }
}

impl fmt::Display for EventSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.year)
    }
}

/// Search for a player by first and last name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSearch {
    first_name: String,
    last_name: String,
}

impl PlayerSearch {
    /// Build from a full display name; first and last words are used
    pub fn from_full_name(full_name: &str) -> Result<Self> {
        let normalized = normalize_name(full_name);
        if normalized.is_empty() {
            return Err(FeedError::invalid_search("player name is empty"));
        }
        let (first, last) = split_name(&normalized);
        Ok(Self { first_name: first.to_string(), last_name: last.to_string() })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn query_url(&self, base_url: &str) -> String {
        format!("{base_url}?FirstName={}&LastName={}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_search_defaults() {
        let search = EventSearch::new("  Las Vegas Challenge ", 2023).unwrap();
        assert_eq!(search.name(), "Las Vegas Challenge");
        assert_eq!(search.tiers(), &[Tier::EliteSeries, Tier::Major]);
        assert_eq!(search.classifications(), &[Classification::Pro]);
    }

    #[test]
    fn test_event_search_query_url() {
        let search = EventSearch::new("Las Vegas Challenge", 2023).unwrap();
        assert_eq!(
            search.query_url(DEFAULT_EVENT_SEARCH_URL),
            "https://www.pdga.com/tour/search?OfficialName=Las%20Vegas%20Challenge\
             &date_filter[min][date]=2023-01-01&date_filter[max][date]=2023-12-31\
             &Tier[]=ES&Tier[]=M&Classification[]=Pro"
        );
    }

    #[test]
    fn test_event_search_validation() {
        assert!(matches!(EventSearch::new("   ", 2023), Err(FeedError::InvalidSearch { .. })));
        assert!(matches!(EventSearch::new("Open", 1950), Err(FeedError::InvalidSearch { .. })));
        assert!(EventSearch::with_filters("Open", 2023, vec![], vec![Classification::Pro]).is_err());
        assert!(EventSearch::with_filters("Open", 2023, vec![Tier::A], vec![]).is_err());
    }

    #[test]
    fn test_player_search() {
        let search = PlayerSearch::from_full_name("  eagle mcmahon ").unwrap();
        assert_eq!(search.first_name(), "Eagle");
        assert_eq!(search.last_name(), "Mcmahon");
        assert_eq!(
            search.query_url(DEFAULT_PLAYER_SEARCH_URL),
            "https://www.pdga.com/players?FirstName=Eagle&LastName=Mcmahon"
        );
        assert!(PlayerSearch::from_full_name(" ").is_err());
    }
}
