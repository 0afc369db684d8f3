//! Team rosters with total and active capacity limits

use crate::error::RosterError;
use event_results::PdgaNumber;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Capacity limits for one roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterLimits {
    /// Maximum number of rostered players
    pub total_limit: usize,

    /// Maximum number of simultaneously active players
    pub active_limit: usize,
}

impl RosterLimits {
    pub fn new(total_limit: usize, active_limit: usize) -> Result<Self, RosterError> {
        let limits = Self { total_limit, active_limit };
        limits.validate()?;
        Ok(limits)
    }

    /// At least one roster spot, and no more active spots than roster spots
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.total_limit == 0 || self.active_limit > self.total_limit {
            return Err(RosterError::InvalidLimits {
                total_limit: self.total_limit,
                active_limit: self.active_limit,
            });
        }
        Ok(())
    }
}

impl Default for RosterLimits {
    fn default() -> Self {
        Self { total_limit: 8, active_limit: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RosterSlot {
    player: PdgaNumber,
    active: bool,
}

/// Ordered, duplicate-free set of players drafted by one team
///
/// Players are activated at add time while active spots remain and benched
/// otherwise. After that, the lineup only changes through
/// [`Roster::set_active`] or the opt-in [`Roster::drop_and_promote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    limits: RosterLimits,
    slots: Vec<RosterSlot>,
}

impl Roster {
    /// Create an empty roster
    pub fn new(limits: RosterLimits) -> Result<Self, RosterError> {
        limits.validate()?;
        Ok(Self { limits, slots: Vec::new() })
    }

    /// Create a roster seeded with players, added in order under the usual rules
    pub fn with_members<I>(limits: RosterLimits, members: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = PdgaNumber>,
    {
        let mut roster = Self::new(limits)?;
        for player in members {
            roster.add(player)?;
        }
        Ok(roster)
    }

    pub fn limits(&self) -> RosterLimits {
        self.limits
    }

    /// Add a player, active if an active spot is free
    pub fn add(&mut self, player: PdgaNumber) -> Result<(), RosterError> {
        if self.contains(player) {
            return Err(RosterError::AlreadyRostered(player));
        }
        if self.is_full() {
            return Err(RosterError::RosterFull { limit: self.limits.total_limit });
        }

        let active = self.active_count() < self.limits.active_limit;
        self.slots.push(RosterSlot { player, active });

        debug!(
            "Added {} to roster ({}), {} of {} active",
            player,
            if active { "active" } else { "bench" },
            self.active_count(),
            self.limits.active_limit
        );
        Ok(())
    }

    /// Remove a player; a freed active spot stays open
    pub fn drop(&mut self, player: PdgaNumber) -> Result<(), RosterError> {
        let index = self.position(player).ok_or(RosterError::NotRostered(player))?;

        self.slots[index].active = false;
        self.slots.remove(index);

        debug!("Dropped {} from roster, {} spots remaining", player, self.limits.total_limit - self.len());
        Ok(())
    }

    /// Remove a player and, if that frees an active spot, activate the first benched player
    ///
    /// Returns the promoted player, if any.
    pub fn drop_and_promote(&mut self, player: PdgaNumber) -> Result<Option<PdgaNumber>, RosterError> {
        self.drop(player)?;

        if self.active_count() >= self.limits.active_limit {
            return Ok(None);
        }

        let promoted = self.slots.iter_mut().find(|slot| !slot.active).map(|slot| {
            slot.active = true;
            slot.player
        });
        if let Some(promoted) = promoted {
            debug!("Promoted {} from the bench", promoted);
        }
        Ok(promoted)
    }

    /// Activate or bench a rostered player
    pub fn set_active(&mut self, player: PdgaNumber, active: bool) -> Result<(), RosterError> {
        let index = self.position(player).ok_or(RosterError::NotRostered(player))?;

        if self.slots[index].active == active {
            return Ok(());
        }
        if active && self.active_count() >= self.limits.active_limit {
            return Err(RosterError::ActiveLimitExceeded { limit: self.limits.active_limit });
        }

        self.slots[index].active = active;
        debug!(
            "{} is now {}, {} active spots remaining",
            player,
            if active { "active" } else { "benched" },
            self.active_spots_remaining()
        );
        Ok(())
    }

    fn position(&self, player: PdgaNumber) -> Option<usize> {
        self.slots.iter().position(|slot| slot.player == player)
    }

    pub fn contains(&self, player: PdgaNumber) -> bool {
        self.position(player).is_some()
    }

    pub fn is_active(&self, player: PdgaNumber) -> bool {
        self.slots.iter().any(|slot| slot.player == player && slot.active)
    }

    /// All members in roster order
    pub fn members(&self) -> Vec<PdgaNumber> {
        self.slots.iter().map(|slot| slot.player).collect()
    }

    /// Active members in roster order
    pub fn active_members(&self) -> Vec<PdgaNumber> {
        self.slots.iter().filter(|slot| slot.active).map(|slot| slot.player).collect()
    }

    /// Benched members in roster order
    pub fn bench(&self) -> Vec<PdgaNumber> {
        self.slots.iter().filter(|slot| !slot.active).map(|slot| slot.player).collect()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn active_spots_remaining(&self) -> i64 {
        self.limits.active_limit as i64 - self.active_count() as i64
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.limits.total_limit
    }
}
