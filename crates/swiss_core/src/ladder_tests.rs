use super::*;
use crate::error::SwissError;
use crate::types::Game;

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn roster(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(n.to_lowercase(), *n)).collect()
}

/// A decided game where `winner` beat `loser`.
fn win(winner: &str, loser: &str) -> Game {
    let mut game = Game::new(id(winner), id(loser));
    game.winner = Some(id(winner));
    game
}

fn bye_win(player: &str) -> Game {
    let mut game = Game::bye(id(player));
    game.winner = Some(id(player));
    game
}

fn names(ladder: &[LadderEntry]) -> Vec<&str> {
    ladder.iter().map(|e| e.player.name.as_str()).collect()
}

fn positions(ladder: &[LadderEntry]) -> Vec<usize> {
    ladder.iter().map(|e| e.position).collect()
}

#[test]
fn test_empty_history_everyone_shares_first() {
    let players = roster(&["A", "B", "C", "D"]);
    let ladder = compute_ladder(&players, &[]).unwrap();

    assert_eq!(names(&ladder), vec!["A", "B", "C", "D"]);
    assert!(ladder.iter().all(|e| e.points == 0 && e.games == 0));
    assert_eq!(positions(&ladder), vec![1, 1, 1, 1]);
}

#[test]
fn test_empty_roster() {
    let ladder = compute_ladder(&[], &[]).unwrap();
    assert!(ladder.is_empty());
}

#[test]
fn test_three_player_first_round() {
    // A beats B, C wins the bye
    let players = roster(&["A", "B", "C"]);
    let rounds = vec![Round::new(vec![win("a", "b"), bye_win("c")])];

    let ladder = compute_ladder(&players, &rounds).unwrap();

    assert_eq!(names(&ladder), vec!["A", "C", "B"]);
    assert_eq!(positions(&ladder), vec![1, 1, 3]);

    let a = &ladder[0];
    assert_eq!((a.points, a.games, a.opponents_score, a.defeated_score), (1, 1, 0, 0));
    let c = &ladder[1];
    assert_eq!((c.points, c.games, c.opponents_score, c.defeated_score), (1, 0, 0, 0));
    let b = &ladder[2];
    assert_eq!((b.points, b.games, b.opponents_score, b.defeated_score), (0, 1, 1, 0));
}

#[test]
fn test_pending_games_score_nothing() {
    let players = roster(&["A", "B"]);
    let rounds = vec![Round::new(vec![Game::new(id("a"), id("b"))])];

    let ladder = compute_ladder(&players, &rounds).unwrap();
    assert!(ladder.iter().all(|e| e.points == 0 && e.games == 0));
    assert_eq!(positions(&ladder), vec![1, 1]);
}

#[test]
fn test_ties_follow_history_changes() {
    let players = roster(&["A", "B", "C", "D"]);
    let rounds = vec![
        Round::new(vec![win("a", "b"), win("c", "d")]),
        Round::new(vec![win("b", "d"), win("a", "c")]),
    ];
    // A 2, B 1, C 1, D 0
    // B met A(2) and D(0) -> 2; C met D(0) and A(2) -> 2
    // B defeated D(0) -> 0; C defeated D(0) -> 0
    let ladder = compute_ladder(&players, &rounds).unwrap();
    assert_eq!(names(&ladder), vec!["A", "B", "C", "D"]);
    assert_eq!(positions(&ladder), vec![1, 2, 2, 4]);

    // A third round lifts B and D, so A and B tie on every key.
    let mut rounds = rounds;
    rounds.push(Round::new(vec![win("d", "c"), win("b", "a")]));
    // A 2, B 2, C 1, D 1
    // A met B(2), C(1), B(2) -> 5; B met A(2), D(1), A(2) -> 5
    // A defeated B, C -> 3; B defeated D, A -> 3
    let ladder = compute_ladder(&players, &rounds).unwrap();
    assert_eq!(names(&ladder), vec!["A", "B", "C", "D"]);
    assert_eq!(ladder[0].opponents_score, 5);
    assert_eq!(ladder[1].opponents_score, 5);
    assert_eq!(positions(&ladder), vec![1, 1, 3, 3]);
}

#[test]
fn test_higher_opponents_score_ranks_first() {
    let players = roster(&["A", "B", "C", "D", "E", "F"]);
    // E beats F, then D beats E: E has 1 point.
    // B beats F: B's victim has 0 points.
    // C beats E: C's victim has 1 point.
    let rounds = vec![
        Round::new(vec![win("e", "f")]),
        Round::new(vec![win("d", "e"), win("b", "f")]),
        Round::new(vec![win("c", "e")]),
    ];
    let ladder = compute_ladder(&players, &rounds).unwrap();

    let pos = |name: &str| names(&ladder).iter().position(|n| *n == name).unwrap();
    // D, B, C all on 1 point. D and C met E (1 point), B met F (0 points).
    assert!(pos("D") < pos("B"));
    assert!(pos("C") < pos("B"));
}

#[test]
fn test_defeated_score_breaks_remaining_ties() {
    let entry = |name: &str, opponents_score, defeated_score| LadderEntry {
        opponents_score,
        defeated_score,
        points: 2,
        ..LadderEntry::new(Player::new(name, name))
    };

    let mut ladder = vec![entry("x", 3, 1), entry("y", 3, 2), entry("z", 4, 0)];
    ladder.sort_by(compare_entries);
    assign_positions(&mut ladder);

    assert_eq!(names(&ladder), vec!["z", "y", "x"]);
    assert_eq!(positions(&ladder), vec![1, 2, 3]);
}

#[test]
fn test_shared_rank_skips_next_position() {
    let entry = |name: &str, points| LadderEntry {
        points,
        ..LadderEntry::new(Player::new(name, name))
    };

    let mut ladder = vec![entry("a", 3), entry("b", 2), entry("c", 2), entry("d", 1)];
    assign_positions(&mut ladder);
    assert_eq!(positions(&ladder), vec![1, 2, 2, 4]);
}

#[test]
fn test_rematch_double_counts_opponent() {
    let players = roster(&["A", "B"]);
    let rounds = vec![
        Round::new(vec![win("a", "b")]),
        Round::new(vec![win("a", "b")]),
    ];
    let ladder = compute_ladder(&players, &rounds).unwrap();

    assert_eq!(ladder[0].points, 2);
    assert_eq!(ladder[0].games, 2);
    assert_eq!(ladder[1].opponents_score, 4);
    assert_eq!(ladder[0].defeated_score, 0);
}

#[test]
fn test_unknown_winner_fails_fast() {
    let players = roster(&["A", "B"]);
    let rounds = vec![Round::new(vec![win("a", "z")])];
    assert!(matches!(
        compute_ladder(&players, &rounds),
        Err(SwissError::UnknownPlayer { .. })
    ));
}
