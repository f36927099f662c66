//! Simulated tournaments: the full round loop with synthetic results.
//!
//! Each round goes through the store exactly the way a request handler
//! would: load a snapshot, pair, record results, save with the version
//! check.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use swiss_core::{Game, PairingStrategy, Player, PlayerId, SwissError};
use tracing::{info, warn};

use crate::error::{TournamentError, TournamentResult};
use crate::store::TournamentStore;
use crate::tournament::{default_round_count, Tournament};

/// How simulated games are decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Black wins every game
    #[default]
    Black,
    /// Coin flip from a seeded RNG
    Random,
}

/// Configuration for a simulated tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tournament name used in the store
    pub name: String,
    /// Number of players
    pub players: usize,
    /// Rounds to play (None = one fewer than players)
    pub rounds: Option<usize>,
    pub outcome: Outcome,
    /// Seed for `Outcome::Random`
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: "Simulation".to_string(),
            players: 9,
            rounds: None,
            outcome: Outcome::Black,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn round_count(&self) -> usize {
        self.rounds
            .unwrap_or_else(|| default_round_count(self.players))
    }
}

/// Result of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub tournament: Tournament,
    pub rounds_played: usize,
    /// Set when pairing failed before all rounds were played
    pub stopped_by: Option<SwissError>,
}

/// Runs simulated tournaments against a store
pub struct Simulator {
    config: SimulationConfig,
    strategy: PairingStrategy,
}

impl Simulator {
    pub fn new(config: SimulationConfig, strategy: PairingStrategy) -> Self {
        Self { config, strategy }
    }

    /// Players named A, B, C, ... (P27, P28, ... past the alphabet).
    pub fn roster(&self) -> Vec<Player> {
        (0..self.config.players)
            .map(|i| {
                let name = match u8::try_from(i) {
                    Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
                    _ => format!("P{}", i + 1),
                };
                Player::new(format!("p{:02}", i + 1), name)
            })
            .collect()
    }

    /// Play the tournament to its configured length.
    ///
    /// A pairing failure ends the run early and is reported in
    /// [`SimulationReport::stopped_by`]; any other error is returned.
    pub fn run(&self, store: &dyn TournamentStore) -> TournamentResult<SimulationReport> {
        let name = self.config.name.as_str();
        store.create(&Tournament::new(name, self.roster())?)?;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut stopped_by = None;

        for _ in 0..self.config.round_count() {
            let mut tournament = store.load(name)?;

            match tournament.pair_next_round(self.strategy) {
                Ok(_) => {}
                Err(TournamentError::Swiss(e @ SwissError::PairingFailure { .. })) => {
                    warn!(tournament = name, error = %e, "Simulation stopped early");
                    stopped_by = Some(e);
                    break;
                }
                Err(e) => return Err(e),
            }

            let number = tournament.rounds.len();
            let results: Vec<(PlayerId, PlayerId)> = tournament.rounds[number - 1]
                .games
                .iter()
                .filter(|g| g.is_pending())
                .map(|g| (g.black.clone(), self.pick_winner(g, &mut rng)))
                .collect();

            for (player, winner) in results {
                tournament.record_result(number, &player, winner)?;
            }

            store.save(&mut tournament)?;
        }

        let tournament = store.load(name)?;
        info!(
            tournament = name,
            rounds = tournament.rounds.len(),
            "Simulation finished"
        );

        Ok(SimulationReport {
            rounds_played: tournament.rounds.len(),
            tournament,
            stopped_by,
        })
    }

    fn pick_winner(&self, game: &Game, rng: &mut StdRng) -> PlayerId {
        match (self.config.outcome, game.white.player()) {
            (Outcome::Random, Some(white)) if rng.gen_bool(0.5) => white.clone(),
            _ => game.black.clone(),
        }
    }
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod simulation_tests;
