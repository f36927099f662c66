//! Ladder (standings) calculation.
//!
//! The ladder is folded from the full round history on every call. Ranking
//! uses points first, then a Buchholz-style opponents score, then a
//! Sonneborn-Berger-style defeated score. Both tie-breaks sum the opponents'
//! *current* points, so they move when an earlier opponent keeps winning.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::error::SwissResult;
use crate::types::{Player, PlayerId, Round};
use crate::validate::validate_history;

/// Points for a decisive win, including a win by bye
pub const WIN_POINTS: u32 = 1;

/// Points for a loss
pub const LOSE_POINTS: u32 = 0;

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderEntry {
    pub player: Player,
    pub points: u32,
    /// Decisive games against real opponents (byes are not counted)
    pub games: u32,
    /// Sum of the points of every opponent met, once per meeting
    pub opponents_score: u32,
    /// Sum of the points of every opponent beaten, once per win
    pub defeated_score: u32,
    /// 1-based rank, shared by entries tied on all three keys
    pub position: usize,
}

impl LadderEntry {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            points: 0,
            games: 0,
            opponents_score: 0,
            defeated_score: 0,
            position: 0,
        }
    }

    /// Ranking key, compared lexicographically.
    fn key(&self) -> (u32, u32, u32) {
        (self.points, self.opponents_score, self.defeated_score)
    }
}

/// Order two entries best-first. `Equal` means a shared position.
pub fn compare_entries(a: &LadderEntry, b: &LadderEntry) -> Ordering {
    b.key().cmp(&a.key())
}

#[derive(Default)]
struct Edges {
    opponents: Vec<PlayerId>,
    defeated: Vec<PlayerId>,
}

/// Compute the standings for `players` after `rounds`.
///
/// Every roster player gets an entry, including players without games.
/// Fails only if the history references unknown players or impossible
/// winners.
pub fn compute_ladder(players: &[Player], rounds: &[Round]) -> SwissResult<Vec<LadderEntry>> {
    validate_history(players, rounds)?;

    // Entries stay in roster order so the stable sort breaks full ties by it.
    let mut entries: Vec<LadderEntry> = players.iter().cloned().map(LadderEntry::new).collect();
    let index: HashMap<&PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (&p.id, i))
        .collect();
    let mut edges: HashMap<&PlayerId, Edges> = HashMap::new();

    for game in rounds.iter().flat_map(|r| r.games.iter()) {
        let Some(winner) = &game.winner else {
            continue;
        };

        entries[index[winner]].points += WIN_POINTS;

        if let Some(loser) = game.loser() {
            let l = index[loser];
            entries[l].points += LOSE_POINTS;
            entries[l].games += 1;
            entries[index[winner]].games += 1;

            let winner_edges = edges.entry(winner).or_default();
            winner_edges.opponents.push(loser.clone());
            winner_edges.defeated.push(loser.clone());
            edges.entry(loser).or_default().opponents.push(winner.clone());
        }
    }

    let points: Vec<u32> = entries.iter().map(|e| e.points).collect();
    let sum_points = |ids: &[PlayerId]| -> u32 { ids.iter().map(|id| points[index[id]]).sum() };

    for entry in &mut entries {
        if let Some(e) = edges.get(&entry.player.id) {
            entry.opponents_score = sum_points(&e.opponents);
            entry.defeated_score = sum_points(&e.defeated);
        }
    }

    entries.sort_by(compare_entries);
    assign_positions(&mut entries);

    debug!(
        players = entries.len(),
        rounds = rounds.len(),
        "Ladder computed"
    );

    Ok(entries)
}

/// Competition ranking over an already sorted ladder: ties share the rank of
/// the first entry in their group, and the next group skips ahead.
pub fn assign_positions(entries: &mut [LadderEntry]) {
    for i in 0..entries.len() {
        entries[i].position = if i > 0 && compare_entries(&entries[i], &entries[i - 1]).is_eq() {
            entries[i - 1].position
        } else {
            i + 1
        };
    }
}

#[cfg(test)]
#[path = "ladder_tests.rs"]
mod ladder_tests;
