//! Configuration for the persistence layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Base directory for persistence files
    pub data_dir: PathBuf,

    /// Sub-directory for per-season score exports
    pub exports_dir_name: String,

    /// Sub-directory for archived event results
    pub events_dir_name: String,

    /// Whether to pretty-print JSON documents
    pub pretty: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            exports_dir_name: "exports".to_string(),
            events_dir_name: "events".to_string(),
            pretty: true,
        }
    }
}

impl PersistenceConfig {
    /// Create a new configuration with custom data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Default::default() }
    }

    /// Get the exports directory path
    pub fn exports_dir(&self) -> PathBuf {
        self.data_dir.join(&self.exports_dir_name)
    }

    /// Get the archived events directory path
    pub fn events_dir(&self) -> PathBuf {
        self.data_dir.join(&self.events_dir_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.exports_dir_name.trim().is_empty() {
            return Err("exports_dir_name must not be empty".to_string());
        }

        if self.events_dir_name.trim().is_empty() {
            return Err("events_dir_name must not be empty".to_string());
        }

        if self.exports_dir_name == self.events_dir_name {
            return Err("exports and events must use different directories".to_string());
        }

        Ok(())
    }
}
