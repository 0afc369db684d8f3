//! Archiving of raw event results next to the season exports

use crate::error::{PersistenceError, Result};
use event_results::EventResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name for an archived event, e.g. `Results_Las-Vegas-Challenge.json`
pub fn archive_file_name(event_name: &str) -> String {
    format!("Results_{}.json", event_name.trim().replace(' ', "-"))
}

/// Write an event's leaderboard to `dir`, returning the written path.
///
/// Events without rows are not written.
pub async fn archive_event_results(dir: impl AsRef<Path>, event: &EventResult) -> Result<PathBuf> {
    if event.is_empty() {
        warn!("Results for \"{}\" do not exist", event.name());
        return Err(PersistenceError::EmptyResults(event.name().to_string()));
    }

    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(archive_file_name(event.name()));
    let json = serde_json::to_string_pretty(event)?;
    tokio::fs::write(&path, json).await?;

    info!("{} has been saved", path.display());
    Ok(path)
}

/// Read an archived event back
pub async fn load_archived_event(path: impl AsRef<Path>) -> Result<EventResult> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    Ok(serde_json::from_str(&content)?)
}
