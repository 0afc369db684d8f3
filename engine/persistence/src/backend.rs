//! Exporter trait and implementations

use crate::config::PersistenceConfig;
use crate::error::{PersistenceError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use league::ExportRow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Destination for scored season rows
#[async_trait]
pub trait PersistenceExporter: Send + Sync {
    /// Replace the stored rows with `rows`, returning how many were written
    async fn export(&self, rows: &[ExportRow]) -> Result<usize>;
}

/// On-disk layout of one exported season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonExport {
    pub season: i32,
    pub exported_at: DateTime<Utc>,
    pub rows: Vec<ExportRow>,
}

/// File name for a season export
pub fn season_file_name(season: i32) -> String {
    format!("season_{season}.json")
}

/// Writes one `season_<year>.json` document per season under the exports directory
pub struct LocalJsonExporter {
    config: PersistenceConfig,
}

impl LocalJsonExporter {
    pub fn new(config: PersistenceConfig) -> Result<Self> {
        config.validate().map_err(PersistenceError::config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    pub fn season_path(&self, season: i32) -> PathBuf {
        self.config.exports_dir().join(season_file_name(season))
    }

    /// Read back the rows stored for one season
    pub async fn load_season(&self, season: i32) -> Result<Vec<ExportRow>> {
        let content = tokio::fs::read_to_string(self.season_path(season)).await?;
        let export: SeasonExport = serde_json::from_str(&content)?;
        Ok(export.rows)
    }

    async fn write_season(&self, season: i32, rows: Vec<ExportRow>) -> Result<()> {
        let export = SeasonExport { season, exported_at: Utc::now(), rows };
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&export)?
        } else {
            serde_json::to_string(&export)?
        };

        let path = self.season_path(season);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!("Wrote {} rows to {}", export.rows.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl PersistenceExporter for LocalJsonExporter {
    async fn export(&self, rows: &[ExportRow]) -> Result<usize> {
        tokio::fs::create_dir_all(self.config.exports_dir()).await?;

        let mut by_season: BTreeMap<i32, Vec<ExportRow>> = BTreeMap::new();
        for row in rows {
            by_season.entry(row.event_year).or_default().push(row.clone());
        }

        let seasons = by_season.len();
        for (season, season_rows) in by_season {
            self.write_season(season, season_rows).await?;
        }

        info!(
            "Exported {} rows across {} seasons to {}",
            rows.len(),
            seasons,
            self.config.exports_dir().display()
        );
        Ok(rows.len())
    }
}

/// In-memory exporter for tests and embedding hosts
#[derive(Debug, Clone, Default)]
pub struct InMemoryExporter {
    rows: Arc<Mutex<Vec<ExportRow>>>,
}

impl InMemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the last export
    pub async fn rows(&self) -> Vec<ExportRow> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl PersistenceExporter for InMemoryExporter {
    async fn export(&self, rows: &[ExportRow]) -> Result<usize> {
        let mut stored = self.rows.lock().await;
        *stored = rows.to_vec();
        debug!("Stored {} rows in memory", stored.len());
        Ok(stored.len())
    }
}
