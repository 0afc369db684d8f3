//! Player Registry - draftable players and their season ledgers
//!
//! This module keeps every player known to a league together with the
//! per-season scores accumulated from finished events.

pub mod ledger;
pub mod registry;
pub mod types;

pub use ledger::{LedgerEntry, SeasonLedger};
pub use registry::{IngestReport, PlayerRegistry};
pub use types::{Player, RegistryError};
