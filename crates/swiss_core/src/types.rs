//! Core data model: players, games and rounds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SwissError, SwissResult};

/// Stable, unique player identity.
///
/// All lookups in the ladder and the pairing matrix go through this id,
/// never through the display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A roster entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The white side of a game: a real player or the bye placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opponent {
    Player(PlayerId),
    Bye,
}

impl Opponent {
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Opponent::Player(id) => Some(id),
            Opponent::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Opponent::Bye)
    }
}

impl fmt::Display for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opponent::Player(id) => write!(f, "{id}"),
            Opponent::Bye => f.write_str("bye"),
        }
    }
}

/// A single pairing inside a round.
///
/// `black`/`white` only name the board side. The bye is never black, so
/// `black` is always a real player. A game without a winner is pending: it
/// scores nothing but still counts as played for repeat avoidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub black: PlayerId,
    pub white: Opponent,
    pub winner: Option<PlayerId>,
}

impl Game {
    /// A pending game between two real players.
    pub fn new(black: PlayerId, white: PlayerId) -> Self {
        Self {
            black,
            white: Opponent::Player(white),
            winner: None,
        }
    }

    /// A pending game against the bye.
    pub fn bye(player: PlayerId) -> Self {
        Self {
            black: player,
            white: Opponent::Bye,
            winner: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.white.is_bye()
    }

    pub fn is_pending(&self) -> bool {
        self.winner.is_none()
    }

    /// Whether `player` sits on either side of this game.
    pub fn involves(&self, player: &PlayerId) -> bool {
        self.black == *player || self.white.player() == Some(player)
    }

    /// Real players in this game, black first.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        std::iter::once(&self.black).chain(self.white.player())
    }

    /// The losing real player, if the game is decided and not a bye.
    pub fn loser(&self) -> Option<&PlayerId> {
        let winner = self.winner.as_ref()?;
        let white = self.white.player()?;
        if winner == white {
            Some(&self.black)
        } else {
            Some(white)
        }
    }

    /// Record the result. The winner must be one of the two real sides.
    pub fn record_winner(&mut self, winner: PlayerId) -> SwissResult<()> {
        if !self.involves(&winner) {
            return Err(SwissError::NotInGame { player: winner });
        }
        self.winner = Some(winner);
        Ok(())
    }
}

/// One simultaneous batch of games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Round {
    pub games: Vec<Game>,
}

impl Round {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// True once every game has a winner.
    pub fn is_complete(&self) -> bool {
        self.games.iter().all(|g| !g.is_pending())
    }

    pub fn game_of(&self, player: &PlayerId) -> Option<&Game> {
        self.games.iter().find(|g| g.involves(player))
    }

    pub fn game_of_mut(&mut self, player: &PlayerId) -> Option<&mut Game> {
        self.games.iter_mut().find(|g| g.involves(player))
    }

    /// Award every pending bye game to its real player.
    pub fn resolve_byes(&mut self) {
        for game in self.games.iter_mut().filter(|g| g.is_bye() && g.is_pending()) {
            game.winner = Some(game.black.clone());
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
