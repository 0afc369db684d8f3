//! Finders that turn raw result rows into typed records
//!
//! A results source only has to expose its table rows through [`ResultRows`].
//! [`EventFinder`] and [`PlayerFinder`] read those rows independently and each
//! produce their own immutable record type.

use crate::error::{FeedError, Result};
use crate::names::normalize_name;
use crate::search::{EventSearch, PlayerSearch};
use crate::types::{EventResult, FeedRow, Outcome, PdgaNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One table row: column name -> cell text
pub type ResultRow = BTreeMap<String, String>;

/// Anything that can hand over already-extracted table rows
pub trait ResultRows {
    fn rows(&self) -> &[ResultRow];
}

/// Rows held in memory, e.g. decoded from a cached page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRows {
    rows: Vec<ResultRow>,
}

impl InMemoryRows {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    /// Build from `(column, value)` pairs per row
    pub fn from_pairs<'a, I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
            .collect();
        Self { rows }
    }
}

impl ResultRows for InMemoryRows {
    fn rows(&self) -> &[ResultRow] {
        &self.rows
    }
}

fn cell<'a>(row: &'a ResultRow, index: usize, column: &'static str) -> Result<&'a str> {
    row.get(column)
        .map(|value| value.trim())
        .ok_or(FeedError::MissingColumn { row: index, column })
}

fn numeric_cell(row: &ResultRow, index: usize, column: &'static str) -> Result<u32> {
    let value = cell(row, index, column)?;
    value.parse::<u32>().map_err(|_| FeedError::InvalidColumn {
        row: index,
        column,
        value: value.to_string(),
    })
}

/// An event located on the results site's search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    pub official_name: String,
    pub event_number: u32,
    pub url: String,
}

/// Locates events and reads their leaderboards
#[derive(Debug, Clone)]
pub struct EventFinder {
    base_url: String,
}

impl EventFinder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Pick the listing for `search` out of the search page rows
    ///
    /// Rows need `classification`, `name` and `link` (the `/tour/event/<number>`
    /// path). Only rows of the searched classifications count; when more than
    /// one matches the first wins and a warning is logged.
    pub fn find<R: ResultRows + ?Sized>(&self, search: &EventSearch, rows: &R) -> Result<EventListing> {
        let mut listings = Vec::new();
        for (index, row) in rows.rows().iter().enumerate() {
            let classification = cell(row, index, "classification")?;
            if !search.classifications().iter().any(|c| c.code() == classification) {
                continue;
            }

            let link = cell(row, index, "link")?;
            let event_number = link
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .and_then(|segment| segment.parse::<u32>().ok())
                .ok_or_else(|| FeedError::InvalidColumn {
                    row: index,
                    column: "link",
                    value: link.to_string(),
                })?;

            listings.push(EventListing {
                official_name: cell(row, index, "name")?.to_string(),
                event_number,
                url: format!("{}{}", self.base_url.trim_end_matches('/'), link),
            });
        }

        if listings.len() > 1 {
            warn!("Search for {} matched {} events, using the first", search, listings.len());
        }

        listings.into_iter().next().ok_or_else(|| FeedError::NotFound(search.to_string()))
    }

    /// Normalize a finished event's leaderboard rows
    ///
    /// Rows need `pdga_number`, `name` and `place`; `rating` is optional.
    /// The place cell is read with [`Outcome`]'s parser, so anything that is
    /// neither a positive place nor `DNF` becomes an `Error` row instead of
    /// failing the whole event. A row without a readable PDGA number cannot
    /// be attributed and is rejected.
    pub fn leaderboard<R: ResultRows + ?Sized>(
        &self,
        listing: &EventListing,
        season: i32,
        rows: &R,
    ) -> Result<EventResult> {
        let mut feed_rows = Vec::with_capacity(rows.rows().len());
        for (index, row) in rows.rows().iter().enumerate() {
            let pdga_number = numeric_cell(row, index, "pdga_number")?;
            let name = cell(row, index, "name")?;
            let outcome: Outcome = row
                .get("place")
                .map(|place| place.parse::<Outcome>().unwrap_or(Outcome::Error))
                .unwrap_or(Outcome::Error);
            if outcome == Outcome::Error {
                debug!("Row {} ({}) of {} has no readable place", index, name, listing.official_name);
            }

            let mut feed_row = FeedRow::new(pdga_number, name, outcome);
            feed_row.rating = row.get("rating").and_then(|r| r.trim().parse().ok());
            feed_rows.push(feed_row);
        }

        Ok(EventResult::new(listing.official_name.clone(), season, feed_rows)?
            .with_event_number(listing.event_number))
    }
}

impl Default for EventFinder {
    fn default() -> Self {
        Self::new("https://www.pdga.com")
    }
}

/// A player located on the results site's player search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub pdga_number: PdgaNumber,
    pub rating: Option<u32>,
    pub profile_url: String,
}

/// Locates players by name
#[derive(Debug, Clone, Default)]
pub struct PlayerFinder;

impl PlayerFinder {
    /// Take the first row of a player search page (`pdga_number`, optional `rating`)
    pub fn find<R: ResultRows + ?Sized>(&self, search: &PlayerSearch, rows: &R) -> Result<PlayerProfile> {
        let (index, row) = rows.rows().iter().enumerate().next().ok_or_else(|| {
            FeedError::NotFound(format!("{} {}", search.first_name(), search.last_name()))
        })?;

        let pdga_number = PdgaNumber(numeric_cell(row, index, "pdga_number")?);
        let rating = row.get("rating").and_then(|r| r.trim().parse().ok());
        let name = row
            .get("name")
            .map(|n| normalize_name(n))
            .unwrap_or_else(|| format!("{} {}", search.first_name(), search.last_name()));

        Ok(PlayerProfile {
            name,
            pdga_number,
            rating,
            profile_url: format!("https://www.pdga.com/player/{}", pdga_number.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_rows() -> InMemoryRows {
        InMemoryRows::from_pairs(vec![
            vec![
                ("classification", "Am"),
                ("name", "Amateur Worlds"),
                ("link", "/tour/event/11111"),
            ],
            vec![
                ("classification", "Pro"),
                ("name", "Las Vegas Challenge presented by Innova"),
                ("link", "/tour/event/64955"),
            ],
        ])
    }

    #[test]
    fn test_event_finder_picks_classified_row() {
        let search = EventSearch::new("Las Vegas Challenge", 2023).unwrap();
        let listing = EventFinder::default().find(&search, &search_rows()).unwrap();
        assert_eq!(listing.event_number, 64955);
        assert_eq!(listing.official_name, "Las Vegas Challenge presented by Innova");
        assert_eq!(listing.url, "https://www.pdga.com/tour/event/64955");
    }

    #[test]
    fn test_event_finder_not_found() {
        let search = EventSearch::new("Nowhere Open", 2023).unwrap();
        let rows = InMemoryRows::default();
        assert!(matches!(EventFinder::default().find(&search, &rows), Err(FeedError::NotFound(_))));
    }

    #[test]
    fn test_event_finder_bad_link() {
        let search = EventSearch::new("Open", 2023).unwrap();
        let rows = InMemoryRows::from_pairs(vec![vec![
            ("classification", "Pro"),
            ("name", "Open"),
            ("link", "/tour/event/abc"),
        ]]);
        assert!(matches!(
            EventFinder::default().find(&search, &rows),
            Err(FeedError::InvalidColumn { column: "link", .. })
        ));
    }

    #[test]
    fn test_leaderboard_normalizes_rows() {
        let listing = EventListing {
            official_name: "Open".to_string(),
            event_number: 5,
            url: String::new(),
        };
        let rows = InMemoryRows::from_pairs(vec![
            vec![("pdga_number", "44382"), ("name", "Calvin Heimburg"), ("place", "1"), ("rating", "1050")],
            vec![("pdga_number", "27523"), ("name", "Paul McBeth"), ("place", "DNF")],
            vec![("pdga_number", "75412"), ("name", "Gannon Buhr"), ("place", "")],
            vec![("pdga_number", "38008"), ("name", "Eagle McMahon")],
        ]);

        let event = EventFinder::default().leaderboard(&listing, 2023, &rows).unwrap();
        assert_eq!(event.event_number(), Some(5));
        let outcomes: Vec<Outcome> = event.rows().iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Placed(1), Outcome::Dnf, Outcome::Error, Outcome::Error]);
        assert_eq!(event.rows()[0].rating, Some(1050));
        assert_eq!(event.rows()[1].rating, None);
    }

    #[test]
    fn test_leaderboard_requires_pdga_number() {
        let listing = EventListing { official_name: "Open".to_string(), event_number: 5, url: String::new() };
        let rows = InMemoryRows::from_pairs(vec![vec![("name", "Nobody"), ("place", "1")]]);
        assert!(matches!(
            EventFinder::default().leaderboard(&listing, 2023, &rows),
            Err(FeedError::MissingColumn { row: 0, column: "pdga_number" })
        ));
    }

    #[test]
    fn test_player_finder() {
        let search = PlayerSearch::from_full_name("kristin tattar").unwrap();
        let rows = InMemoryRows::from_pairs(vec![vec![
            ("name", "KRISTIN TATTAR"),
            ("pdga_number", "69509"),
            ("rating", "980"),
        ]]);
        let profile = PlayerFinder.find(&search, &rows).unwrap();
        assert_eq!(profile.name, "Kristin Tattar");
        assert_eq!(profile.pdga_number, PdgaNumber(69509));
        assert_eq!(profile.rating, Some(980));
        assert_eq!(profile.profile_url, "https://www.pdga.com/player/69509");

        assert!(PlayerFinder.find(&search, &InMemoryRows::default()).is_err());
    }
}
