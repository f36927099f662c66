//! Tournament-level errors

use swiss_core::SwissError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Swiss(#[from] SwissError),

    #[error("Tournament not found: {0}")]
    NotFound(String),

    #[error("Tournament already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid tournament name: {0:?}")]
    InvalidName(String),

    #[error("Tournament name {name:?} maps to the same file as {existing:?}")]
    NameClash { name: String, existing: String },

    #[error("Tournament {0} is locked by another writer")]
    Locked(String),

    #[error("Tournament {name} was modified concurrently: expected version {expected}, found {actual}")]
    VersionConflict {
        name: String,
        expected: u64,
        actual: u64,
    },

    #[error("Round {0} still has games without a result")]
    RoundInProgress(usize),

    #[error("Players cannot join after the first round has been paired")]
    AlreadyStarted,

    #[error("Insufficient players: need {needed}, have {current}")]
    NotEnoughPlayers { needed: usize, current: usize },

    #[error("Round {0} does not exist")]
    NoSuchRound(usize),

    #[error("No game for {player} in round {round}")]
    GameNotFound { round: usize, player: String },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Player name {0:?} matches more than one player, use the id")]
    AmbiguousPlayer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type TournamentResult<T> = Result<T, TournamentError>;
