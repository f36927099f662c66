//! Fail-fast checks on roster and round history.
//!
//! A game that names a player outside the roster, or a winner that did not
//! play, means the stored history is corrupt. Both entry points of this
//! crate reject such input instead of skipping it.

use std::collections::HashSet;

use crate::error::{SwissError, SwissResult};
use crate::types::{Player, PlayerId, Round};

/// Check that `players` has unique ids and that every game in `rounds` only
/// references those players.
pub fn validate_history(players: &[Player], rounds: &[Round]) -> SwissResult<()> {
    check_history(players.iter().map(|p| &p.id), rounds)
}

pub(crate) fn check_history<'a>(
    roster: impl IntoIterator<Item = &'a PlayerId>,
    rounds: &[Round],
) -> SwissResult<()> {
    let mut known = HashSet::new();
    for id in roster {
        if !known.insert(id) {
            return Err(SwissError::DuplicatePlayer { player: id.clone() });
        }
    }

    for (r, round) in rounds.iter().enumerate() {
        let round_no = r + 1;
        let mut seen = HashSet::new();

        for (g, game) in round.games.iter().enumerate() {
            let game_no = g + 1;

            for player in game.players() {
                if !known.contains(player) {
                    return Err(SwissError::UnknownPlayer {
                        round: round_no,
                        game: game_no,
                        player: player.clone(),
                    });
                }
            }

            if game.white.player() == Some(&game.black) {
                return Err(SwissError::SelfPairing {
                    round: round_no,
                    game: game_no,
                    player: game.black.clone(),
                });
            }

            for player in game.players() {
                if !seen.insert(player) {
                    return Err(SwissError::DoubleBooked {
                        round: round_no,
                        player: player.clone(),
                    });
                }
            }

            if let Some(winner) = &game.winner {
                if !game.involves(winner) {
                    return Err(SwissError::InvalidWinner {
                        round: round_no,
                        game: game_no,
                        winner: winner.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
