//! Text reports for ladders and rounds

use std::collections::HashMap;
use swiss_core::{Game, LadderEntry, Opponent};

use crate::error::TournamentResult;
use crate::tournament::Tournament;

/// Render the standings table
pub fn ladder_report(ladder: &[LadderEntry]) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{:>4} {:<24} {:>6} {:>6} {:>6} {:>6}\n",
        "Pos", "Player", "Points", "Games", "Opp", "Def"
    ));
    report.push_str(&"-".repeat(57));
    report.push('\n');

    for entry in ladder {
        report.push_str(&format!(
            "{:>4} {:<24} {:>6} {:>6} {:>6} {:>6}\n",
            entry.position,
            entry.player.name,
            entry.points,
            entry.games,
            entry.opponents_score,
            entry.defeated_score
        ));
    }

    report
}

fn result_label(game: &Game) -> &'static str {
    match (&game.winner, &game.white) {
        (None, _) => "pending",
        (Some(_), Opponent::Bye) => "bye",
        (Some(winner), _) if *winner == game.black => "1-0",
        (Some(_), _) => "0-1",
    }
}

/// Render round `number` (1-based) with display names
pub fn round_report(tournament: &Tournament, number: usize) -> Option<String> {
    let round = tournament.round(number)?;
    let names: HashMap<_, _> = tournament
        .players
        .iter()
        .map(|p| (&p.id, p.name.as_str()))
        .collect();

    let mut report = format!("Round {}:\n", number);
    for game in &round.games {
        let black = names.get(&game.black).copied().unwrap_or(game.black.as_str());
        let white = match &game.white {
            Opponent::Player(id) => names.get(id).copied().unwrap_or(id.as_str()),
            Opponent::Bye => "(bye)",
        };
        report.push_str(&format!(
            "  {:<24} vs {:<24} {}\n",
            black,
            white,
            result_label(game)
        ));
    }
    Some(report)
}

/// Render every round followed by the current ladder
pub fn tournament_report(tournament: &Tournament) -> TournamentResult<String> {
    let mut report = String::new();
    report.push_str(&format!("=== Tournament: {} ===\n\n", tournament.name));
    report.push_str(&format!(
        "Players: {}, Rounds: {}\n\n",
        tournament.players.len(),
        tournament.rounds.len()
    ));

    for number in 1..=tournament.rounds.len() {
        if let Some(round) = round_report(tournament, number) {
            report.push_str(&round);
            report.push('\n');
        }
    }

    report.push_str(&ladder_report(&tournament.ladder()?));
    Ok(report)
}
