//! Round pairing.
//!
//! Candidates are taken in ladder order. With an odd count a bye is put in
//! front, then candidates are matched best-ranked first against the nearest
//! candidate they have not met yet.
//!
//! The default [`PairingStrategy::Greedy`] never revisits an earlier pair, so
//! it can fail on histories where a complete pairing still exists. That
//! outcome is kept stable for existing tournaments. [`PairingStrategy::Backtracking`]
//! is the opt-in alternative: it returns the greedy round whenever greedy
//! succeeds and searches for another one only when it does not.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{SwissError, SwissResult};
use crate::ladder::LadderEntry;
use crate::types::{Game, Opponent, Round};
use crate::validate::check_history;

/// How the next round is matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingStrategy {
    /// First valid left-to-right assignment, no backtracking
    #[default]
    Greedy,
    /// Greedy first, then a depth-first search in the same candidate order
    Backtracking,
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingStrategy::Greedy => f.write_str("greedy"),
            PairingStrategy::Backtracking => f.write_str("backtracking"),
        }
    }
}

impl FromStr for PairingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(PairingStrategy::Greedy),
            "backtracking" | "backtrack" => Ok(PairingStrategy::Backtracking),
            _ => Err(format!("Unknown pairing strategy: {}", s)),
        }
    }
}

/// Symmetric "already played" matrix over pairing candidates.
#[derive(Debug, Clone)]
pub struct PlayedMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl PlayedMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn mark(&mut self, a: usize, b: usize) {
        self.cells[a * self.size + b] = true;
        self.cells[b * self.size + a] = true;
    }

    #[inline]
    pub fn has_played(&self, a: usize, b: usize) -> bool {
        self.cells[a * self.size + b]
    }
}

/// Candidates in pairing order: the bye (if any) first, then the ladder.
fn candidates(ladder: &[LadderEntry]) -> Vec<Opponent> {
    let mut list = Vec::with_capacity(ladder.len() + 1);
    if ladder.len() % 2 == 1 {
        list.push(Opponent::Bye);
    }
    list.extend(ladder.iter().map(|e| Opponent::Player(e.player.id.clone())));
    list
}

/// Build the played matrix for `candidates` from every game in `rounds`.
///
/// Bye games only leave a mark when the current candidate list has a bye.
pub fn played_matrix(candidates: &[Opponent], rounds: &[Round]) -> PlayedMatrix {
    let index: HashMap<&Opponent, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (c, i))
        .collect();

    let mut matrix = PlayedMatrix::new(candidates.len());
    for game in rounds.iter().flat_map(|r| r.games.iter()) {
        let black = index.get(&Opponent::Player(game.black.clone()));
        let white = index.get(&game.white);
        if let (Some(&a), Some(&b)) = (black, white) {
            matrix.mark(a, b);
        }
    }
    matrix
}

/// Generate the next round with the default greedy strategy.
pub fn generate_round(ladder: &[LadderEntry], rounds: &[Round]) -> SwissResult<Round> {
    generate_round_with(PairingStrategy::Greedy, ladder, rounds)
}

/// Generate the next round from the ranked `ladder` and the full history.
///
/// Every returned game is pending. Fails with [`SwissError::PairingFailure`]
/// when the strategy cannot pair every candidate.
pub fn generate_round_with(
    strategy: PairingStrategy,
    ladder: &[LadderEntry],
    rounds: &[Round],
) -> SwissResult<Round> {
    check_history(ladder.iter().map(|e| &e.player.id), rounds)?;

    let candidates = candidates(ladder);
    let played = played_matrix(&candidates, rounds);
    let round_no = rounds.len() + 1;

    let pairs = match greedy_pairs(&played) {
        Ok(pairs) => pairs,
        Err(stuck) => {
            let fallback = match strategy {
                PairingStrategy::Greedy => None,
                PairingStrategy::Backtracking => {
                    debug!(round = round_no, "Greedy pairing failed, searching");
                    backtracking_pairs(&played)
                }
            };
            match fallback {
                Some(pairs) => pairs,
                None => {
                    let candidate = candidates[stuck].clone();
                    warn!(round = round_no, %candidate, %strategy, "Pairing failed");
                    return Err(SwissError::PairingFailure {
                        candidate,
                        round: round_no,
                    });
                }
            }
        }
    };

    let games: Vec<Game> = pairs
        .into_iter()
        .map(|(i, j)| make_game(&candidates[i], &candidates[j]))
        .collect();

    for game in &games {
        debug!(round = round_no, black = %game.black, white = %game.white, "Paired");
    }
    info!(round = round_no, games = games.len(), %strategy, "Round generated");

    Ok(Round::new(games))
}

/// Build a pending game for candidates `i < j`; the bye always takes white.
fn make_game(first: &Opponent, second: &Opponent) -> Game {
    match (first, second) {
        (Opponent::Player(black), Opponent::Player(white)) => {
            Game::new(black.clone(), white.clone())
        }
        (Opponent::Bye, Opponent::Player(player)) | (Opponent::Player(player), Opponent::Bye) => {
            Game::bye(player.clone())
        }
        (Opponent::Bye, Opponent::Bye) => unreachable!("only one bye is added per round"),
    }
}

/// Left-to-right greedy matching. On failure returns the index of the
/// candidate left without an opponent.
fn greedy_pairs(played: &PlayedMatrix) -> Result<Vec<(usize, usize)>, usize> {
    let n = played.len();
    let mut paired = vec![false; n];
    let mut pairs = Vec::with_capacity(n / 2);

    for i in 0..n {
        if paired[i] {
            continue;
        }

        let j = (i + 1..n)
            .find(|&j| !paired[j] && !played.has_played(i, j))
            .ok_or(i)?;

        paired[i] = true;
        paired[j] = true;
        pairs.push((i, j));
    }

    Ok(pairs)
}

/// Depth-first search over the same candidate order as [`greedy_pairs`].
fn backtracking_pairs(played: &PlayedMatrix) -> Option<Vec<(usize, usize)>> {
    fn search(played: &PlayedMatrix, paired: &mut [bool], pairs: &mut Vec<(usize, usize)>) -> bool {
        let Some(i) = paired.iter().position(|p| !p) else {
            return true;
        };

        paired[i] = true;
        for j in i + 1..paired.len() {
            if paired[j] || played.has_played(i, j) {
                continue;
            }
            paired[j] = true;
            pairs.push((i, j));
            if search(played, paired, pairs) {
                return true;
            }
            pairs.pop();
            paired[j] = false;
        }
        paired[i] = false;
        false
    }

    let mut paired = vec![false; played.len()];
    let mut pairs = Vec::with_capacity(played.len() / 2);
    search(played, &mut paired, &mut pairs).then_some(pairs)
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
