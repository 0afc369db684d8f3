use crate::models::{DataErrorKind, FinishStatus, ScoreOutcome};
use event_results::{EventResult, Outcome, PdgaNumber};
use tracing::{debug, info, warn};

/// Maps a finished event and a player to that player's fantasy score
pub trait ScoringPolicy {
    fn score(&self, event: &EventResult, player: PdgaNumber, verbose: bool) -> ScoreOutcome;
}

/// Score is the finishing place; a DNF scores one worse than last place
///
/// Lower is better. Unreadable rows and DNFs in an event nobody finished are
/// reported as data errors and never produce a score.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementScoring;

impl ScoringPolicy for PlacementScoring {
    fn score(&self, event: &EventResult, player: PdgaNumber, verbose: bool) -> ScoreOutcome {
        let Some(row) = event.row_for(player) else {
            if verbose {
                info!("{} did not play in {}", player, event);
            } else {
                debug!("{} did not play in {}", player, event);
            }
            return ScoreOutcome::NotPlayed;
        };

        match row.outcome {
            Outcome::Placed(place) => ScoreOutcome::Scored { score: place, finish: FinishStatus::Finished },
            Outcome::Dnf => match event.max_placement().map(|last_place| last_place.checked_add(1)) {
                Some(Some(score)) => {
                    debug!("{} DNF in {}, scored as {}", row.name, event, score);
                    ScoreOutcome::Scored { score, finish: FinishStatus::Dnf }
                }
                Some(None) => {
                    log_data_error(verbose, &row.name, event, DataErrorKind::PlacementOverflow);
                    ScoreOutcome::DataError(DataErrorKind::PlacementOverflow)
                }
                None => {
                    log_data_error(verbose, &row.name, event, DataErrorKind::NoNumericPlacements);
                    ScoreOutcome::DataError(DataErrorKind::NoNumericPlacements)
                }
            },
            Outcome::Error => {
                log_data_error(verbose, &row.name, event, DataErrorKind::UnparseableRow);
                ScoreOutcome::DataError(DataErrorKind::UnparseableRow)
            }
        }
    }
}

fn log_data_error(verbose: bool, name: &str, event: &EventResult, kind: DataErrorKind) {
    if verbose {
        warn!("Something went wrong for {} in the {} event: {}", name, event, kind);
    } else {
        debug!("Skipping {} in {}: {}", name, event, kind);
    }
}
