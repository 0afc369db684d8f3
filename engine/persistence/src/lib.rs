//! # Persistence Layer
//!
//! Writes scored league data out of the engine. The core hands over plain
//! [`league::ExportRow`] values; how they are stored is up to the exporter.
//!
//! ## Architecture
//!
//! - **PersistenceExporter**: Abstract trait for export destinations
//! - **LocalJsonExporter**: One `season_<year>.json` document per season
//! - **InMemoryExporter**: Replace-all store for tests and hosts
//! - **archive**: Raw event leaderboards saved as `Results_<Event-Name>.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use persistence::{create_local_exporter, PersistenceExporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exporter = create_local_exporter("./data")?;
//!     let written = exporter.export(&[]).await?;
//!     println!("exported {written} rows");
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod backend;
pub mod config;
pub mod error;

pub use archive::{archive_event_results, archive_file_name, load_archived_event};
pub use backend::{season_file_name, InMemoryExporter, LocalJsonExporter, PersistenceExporter, SeasonExport};
pub use config::PersistenceConfig;
pub use error::{PersistenceError, Result};

use std::path::Path;

/// Create a local JSON exporter rooted at `data_dir` with default settings
pub fn create_local_exporter(data_dir: impl AsRef<Path>) -> Result<LocalJsonExporter> {
    LocalJsonExporter::new(PersistenceConfig::new(data_dir.as_ref()))
}
