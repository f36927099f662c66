//! Errors raised by ladder calculation and pairing.

use thiserror::Error;

use crate::types::{Opponent, PlayerId};

/// Round and game numbers in these errors are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwissError {
    /// The greedy matcher ran out of opponents. No partial round is produced.
    #[error("Matching players failed: no unplayed opponent left for {candidate} in round {round}")]
    PairingFailure { candidate: Opponent, round: usize },

    #[error("Round {round}, game {game}: unknown player {player}")]
    UnknownPlayer {
        round: usize,
        game: usize,
        player: PlayerId,
    },

    #[error("Round {round}, game {game}: winner {winner} is not one of the two sides")]
    InvalidWinner {
        round: usize,
        game: usize,
        winner: PlayerId,
    },

    #[error("Round {round}, game {game}: {player} is paired against themselves")]
    SelfPairing {
        round: usize,
        game: usize,
        player: PlayerId,
    },

    #[error("Round {round}: {player} appears in more than one game")]
    DoubleBooked { round: usize, player: PlayerId },

    #[error("Player {player} is listed more than once in the roster")]
    DuplicatePlayer { player: PlayerId },

    #[error("{player} did not play in this game")]
    NotInGame { player: PlayerId },
}

pub type SwissResult<T> = Result<T, SwissError>;
