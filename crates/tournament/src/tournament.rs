//! The tournament aggregate: roster, round history and a version counter.
//!
//! Everything derived (the ladder, the next round) is recomputed from
//! `players` and `rounds` through `swiss_core` on demand.

use serde::{Deserialize, Serialize};
use swiss_core::{
    compute_ladder, generate_round_with, validate_history, LadderEntry, PairingStrategy, Player,
    PlayerId, Round,
};
use tracing::info;

use crate::error::{TournamentError, TournamentResult};

/// Minimum roster size for pairing
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    /// Bumped by the store on every successful save
    #[serde(default)]
    pub version: u64,
}

impl Tournament {
    pub fn new(name: &str, players: Vec<Player>) -> TournamentResult<Self> {
        validate_history(&players, &[])?;
        Ok(Self {
            name: name.to_string(),
            players,
            rounds: Vec::new(),
            version: 0,
        })
    }

    /// Add a player to the roster. Only allowed before the first round.
    pub fn add_player(&mut self, player: Player) -> TournamentResult<()> {
        if !self.rounds.is_empty() {
            return Err(TournamentError::AlreadyStarted);
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(swiss_core::SwissError::DuplicatePlayer { player: player.id }.into());
        }
        self.players.push(player);
        Ok(())
    }

    /// Current standings.
    pub fn ladder(&self) -> TournamentResult<Vec<LadderEntry>> {
        Ok(compute_ladder(&self.players, &self.rounds)?)
    }

    /// The most recently paired round.
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Look up a round by its 1-based number.
    pub fn round(&self, number: usize) -> Option<&Round> {
        number.checked_sub(1).and_then(|i| self.rounds.get(i))
    }

    /// Find a player by id, or by name when the name is unique.
    pub fn find_player(&self, key: &str) -> TournamentResult<&Player> {
        if let Some(player) = self.players.iter().find(|p| p.id.as_str() == key) {
            return Ok(player);
        }

        let mut by_name = self.players.iter().filter(|p| p.name == key);
        match (by_name.next(), by_name.next()) {
            (Some(player), None) => Ok(player),
            (Some(_), Some(_)) => Err(TournamentError::AmbiguousPlayer(key.to_string())),
            (None, _) => Err(TournamentError::UnknownPlayer(key.to_string())),
        }
    }

    /// Pair the next round and append it to the history.
    ///
    /// The previous round must be complete. Bye games are decided right away,
    /// every other game of the new round is pending.
    pub fn pair_next_round(&mut self, strategy: PairingStrategy) -> TournamentResult<&Round> {
        if self.players.len() < MIN_PLAYERS {
            return Err(TournamentError::NotEnoughPlayers {
                needed: MIN_PLAYERS,
                current: self.players.len(),
            });
        }
        if let Some(last) = self.current_round() {
            if !last.is_complete() {
                return Err(TournamentError::RoundInProgress(self.rounds.len()));
            }
        }

        let ladder = self.ladder()?;
        let mut round = generate_round_with(strategy, &ladder, &self.rounds)?;
        round.resolve_byes();

        self.rounds.push(round);
        info!(
            tournament = %self.name,
            round = self.rounds.len(),
            "Paired next round"
        );

        let last = self.rounds.len() - 1;
        Ok(&self.rounds[last])
    }

    /// Record `winner` for the game `player` plays in round `round_number`.
    ///
    /// A result that was already set is overwritten.
    pub fn record_result(
        &mut self,
        round_number: usize,
        player: &PlayerId,
        winner: PlayerId,
    ) -> TournamentResult<()> {
        let round = round_number
            .checked_sub(1)
            .and_then(|i| self.rounds.get_mut(i))
            .ok_or(TournamentError::NoSuchRound(round_number))?;

        let game = round
            .game_of_mut(player)
            .ok_or_else(|| TournamentError::GameNotFound {
                round: round_number,
                player: player.to_string(),
            })?;

        game.record_winner(winner.clone())?;
        info!(
            tournament = %self.name,
            round = round_number,
            %winner,
            "Result recorded"
        );
        Ok(())
    }

    /// True when `max_rounds` rounds exist and the last one is complete.
    pub fn is_finished(&self, max_rounds: usize) -> bool {
        self.rounds.len() >= max_rounds && self.current_round().is_none_or(Round::is_complete)
    }
}

/// Default length of a tournament: one round fewer than there are players.
pub fn default_round_count(players: usize) -> usize {
    players.saturating_sub(1)
}

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
