use serde::{Deserialize, Serialize};
use std::fmt;

/// How a scored player left the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishStatus {
    Finished,
    Dnf,
}

impl fmt::Display for FinishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishStatus::Finished => write!(f, "Finished"),
            FinishStatus::Dnf => write!(f, "DNF"),
        }
    }
}

/// Why an event row could not be turned into a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataErrorKind {
    /// The feed marked the player's row as unreadable
    UnparseableRow,
    /// A DNF needs the worst numeric placement but nobody finished
    NoNumericPlacements,
    /// A DNF cannot be placed after the last numeric placement
    PlacementOverflow,
}

impl fmt::Display for DataErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataErrorKind::UnparseableRow => write!(f, "unparseable row"),
            DataErrorKind::NoNumericPlacements => write!(f, "no numeric placements to score a DNF against"),
            DataErrorKind::PlacementOverflow => write!(f, "last placement leaves no room for a DNF score"),
        }
    }
}

/// Status half of a scoring result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreStatus {
    Ok,
    NotPlayed,
    DataError(DataErrorKind),
}

/// Result of scoring one player against one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOutcome {
    Scored { score: u32, finish: FinishStatus },
    NotPlayed,
    DataError(DataErrorKind),
}

impl ScoreOutcome {
    pub fn score(&self) -> Option<u32> {
        match self {
            ScoreOutcome::Scored { score, .. } => Some(*score),
            _ => None,
        }
    }

    pub fn status(&self) -> ScoreStatus {
        match self {
            ScoreOutcome::Scored { .. } => ScoreStatus::Ok,
            ScoreOutcome::NotPlayed => ScoreStatus::NotPlayed,
            ScoreOutcome::DataError(kind) => ScoreStatus::DataError(*kind),
        }
    }
}
