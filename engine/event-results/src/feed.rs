use crate::error::{FeedError, Result};
use crate::search::EventSearch;
use crate::types::EventResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Source of finished event results
///
/// How results are obtained (scraping, an API, files on disk) is up to the
/// implementation; callers only ever see validated [`EventResult`] values.
#[async_trait::async_trait]
pub trait ResultsFeed: Send + Sync {
    /// Fetch the final leaderboard for one event
    async fn fetch_event(&self, search: &EventSearch) -> Result<EventResult>;
}

/// File name used for an event's results document ("Las Vegas Challenge" -> "Las-Vegas-Challenge.json")
pub fn event_file_name(event_name: &str) -> String {
    format!("{}.json", event_name.trim().replace(' ', "-"))
}

/// Results feed backed by JSON documents laid out as `<root>/<year>/<Event-Name>.json`
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    root: PathBuf,
}

impl JsonFileFeed {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn event_path(&self, search: &EventSearch) -> PathBuf {
        self.root.join(search.year().to_string()).join(event_file_name(search.name()))
    }

    /// Load one results document from an explicit path
    pub async fn load_file<P: AsRef<Path>>(file_path: P) -> Result<EventResult> {
        info!("Loading event results from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let event: EventResult = serde_json::from_str(&json_content)?;

        info!("Loaded {} rows for {}", event.len(), event);
        Ok(event)
    }

    /// Load every results document stored for a season, sorted by file name
    ///
    /// Files that cannot be read or parsed are logged and skipped.
    pub async fn load_season(&self, year: i32) -> Result<Vec<EventResult>> {
        let season_dir = self.root.join(year.to_string());
        let mut entries = tokio::fs::read_dir(&season_dir).await?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut events = Vec::with_capacity(paths.len());
        for path in paths {
            let event = match Self::load_file(&path).await {
                Ok(event) => event,
                Err(e) => {
                    warn!("Skipping unreadable results file {:?}: {}", path, e);
                    continue;
                }
            };
            if event.season() != year {
                warn!("Skipping {:?}: it holds season {} results", path, event.season());
                continue;
            }
            events.push(event);
        }

        Ok(events)
    }
}

#[async_trait::async_trait]
impl ResultsFeed for JsonFileFeed {
    async fn fetch_event(&self, search: &EventSearch) -> Result<EventResult> {
        let path = self.event_path(search);
        if !tokio::fs::try_exists(&path).await? {
            return Err(FeedError::NotFound(search.to_string()));
        }

        let event = Self::load_file(&path).await?;
        if event.season() != search.year() {
            return Err(FeedError::NotFound(search.to_string()));
        }
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeedRow, Outcome};
    use tempfile::TempDir;

    async fn write_event(root: &Path, event: &EventResult) {
        let dir = root.join(event.season().to_string());
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let json = serde_json::to_string_pretty(event).unwrap();
        tokio::fs::write(dir.join(event_file_name(event.name())), json).await.unwrap();
    }

    fn sample_event(name: &str, season: i32) -> EventResult {
        EventResult::new(
            name,
            season,
            vec![
                FeedRow::new(44382u32, "Calvin Heimburg", Outcome::Placed(1)),
                FeedRow::new(27523u32, "Paul McBeth", Outcome::Dnf),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_event_file_name() {
        assert_eq!(event_file_name(" Las Vegas Challenge "), "Las-Vegas-Challenge.json");
    }

    #[tokio::test]
    async fn test_fetch_event_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let event = sample_event("Las Vegas Challenge", 2023);
        write_event(temp_dir.path(), &event).await;

        let feed = JsonFileFeed::new(temp_dir.path());
        let search = EventSearch::new("Las Vegas Challenge", 2023).unwrap();
        let fetched = feed.fetch_event(&search).await.unwrap();
        assert_eq!(fetched, event);
    }

    #[tokio::test]
    async fn test_fetch_missing_event() {
        let temp_dir = TempDir::new().unwrap();
        let feed = JsonFileFeed::new(temp_dir.path());
        let search = EventSearch::new("Nowhere Open", 2023).unwrap();
        assert!(matches!(feed.fetch_event(&search).await, Err(FeedError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_season_skips_other_years() {
        let temp_dir = TempDir::new().unwrap();
        write_event(temp_dir.path(), &sample_event("Waco Open", 2023)).await;
        write_event(temp_dir.path(), &sample_event("Austin Open", 2023)).await;

        // a 2022 document misfiled under 2023
        let stray = sample_event("Stray Open", 2022);
        let json = serde_json::to_string(&stray).unwrap();
        tokio::fs::write(temp_dir.path().join("2023").join("Stray-Open.json"), json).await.unwrap();

        let feed = JsonFileFeed::new(temp_dir.path());
        let events = feed.load_season(2023).await.unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Austin Open", "Waco Open"]);
    }

    #[tokio::test]
    async fn test_load_season_skips_unreadable_files() {
        let temp_dir = TempDir::new().unwrap();
        write_event(temp_dir.path(), &sample_event("Waco Open", 2023)).await;
        tokio::fs::write(temp_dir.path().join("2023").join("Broken-Open.json"), "{\"name\": ")
            .await
            .unwrap();

        let feed = JsonFileFeed::new(temp_dir.path());
        let events = feed.load_season(2023).await.unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Waco Open"]);
    }
}
