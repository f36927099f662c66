use super::*;
use swiss_core::SwissError;

fn id(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn three_player() -> Tournament {
    Tournament::new(
        "Club night",
        vec![
            Player::new("a", "Alice"),
            Player::new("b", "Bob"),
            Player::new("c", "Carol"),
        ],
    )
    .unwrap()
}

#[test]
fn test_new_rejects_duplicate_ids() {
    let err = Tournament::new("x", vec![Player::new("a", "A"), Player::new("a", "B")]).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Swiss(SwissError::DuplicatePlayer { .. })
    ));
}

#[test]
fn test_pairing_resolves_byes() {
    let mut t = three_player();
    let round = t.pair_next_round(PairingStrategy::Greedy).unwrap();

    assert_eq!(round.len(), 2);
    let bye = round.games.iter().find(|g| g.is_bye()).unwrap();
    assert_eq!(bye.winner, Some(bye.black.clone()));
    assert!(!round.is_complete());
}

#[test]
fn test_next_round_waits_for_results() {
    let mut t = three_player();
    t.pair_next_round(PairingStrategy::Greedy).unwrap();

    let err = t.pair_next_round(PairingStrategy::Greedy).unwrap_err();
    assert!(matches!(err, TournamentError::RoundInProgress(1)));

    t.record_result(1, &id("b"), id("c")).unwrap();
    assert!(t.current_round().unwrap().is_complete());
    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    assert_eq!(t.rounds.len(), 2);
}

#[test]
fn test_record_result_updates_ladder() {
    let mut t = three_player();
    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    // Alice has the bye, Bob plays Carol.
    t.record_result(1, &id("c"), id("c")).unwrap();

    let ladder = t.ladder().unwrap();
    let summary: Vec<_> = ladder
        .iter()
        .map(|e| (e.player.name.as_str(), e.points, e.position))
        .collect();
    assert_eq!(summary, vec![("Alice", 1, 1), ("Carol", 1, 1), ("Bob", 0, 3)]);
}

#[test]
fn test_record_result_errors() {
    let mut t = three_player();
    assert!(matches!(
        t.record_result(1, &id("a"), id("a")),
        Err(TournamentError::NoSuchRound(1))
    ));

    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    assert!(matches!(
        t.record_result(1, &id("z"), id("z")),
        Err(TournamentError::GameNotFound { round: 1, .. })
    ));
    assert!(matches!(
        t.record_result(1, &id("b"), id("a")),
        Err(TournamentError::Swiss(SwissError::NotInGame { .. }))
    ));
    assert!(matches!(
        t.record_result(0, &id("b"), id("b")),
        Err(TournamentError::NoSuchRound(0))
    ));
}

#[test]
fn test_add_player_only_before_start() {
    let mut t = three_player();
    t.add_player(Player::new("d", "Dave")).unwrap();
    assert!(t.add_player(Player::new("d", "Dave again")).is_err());

    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    assert!(matches!(
        t.add_player(Player::new("e", "Eve")),
        Err(TournamentError::AlreadyStarted)
    ));
}

#[test]
fn test_too_few_players() {
    let mut t = Tournament::new("solo", vec![Player::new("a", "A")]).unwrap();
    assert!(matches!(
        t.pair_next_round(PairingStrategy::Greedy),
        Err(TournamentError::NotEnoughPlayers { needed: 2, current: 1 })
    ));
}

#[test]
fn test_find_player_by_id_or_name() {
    let mut t = three_player();
    t.add_player(Player::new("b2", "Bob")).unwrap();

    assert_eq!(t.find_player("a").unwrap().name, "Alice");
    assert_eq!(t.find_player("Carol").unwrap().id, id("c"));
    assert!(matches!(
        t.find_player("Bob"),
        Err(TournamentError::AmbiguousPlayer(_))
    ));
    assert!(matches!(
        t.find_player("Zed"),
        Err(TournamentError::UnknownPlayer(_))
    ));
}

#[test]
fn test_is_finished() {
    let mut t = three_player();
    assert!(!t.is_finished(default_round_count(3)));

    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    t.record_result(1, &id("b"), id("b")).unwrap();
    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    assert!(!t.is_finished(2));

    let pending = t
        .current_round()
        .unwrap()
        .games
        .iter()
        .find(|g| g.is_pending())
        .unwrap()
        .black
        .clone();
    t.record_result(2, &pending, pending.clone()).unwrap();
    assert!(t.is_finished(2));
}

#[test]
fn test_round_lookup_is_one_based() {
    let mut t = three_player();
    t.pair_next_round(PairingStrategy::Greedy).unwrap();
    assert!(t.round(0).is_none());
    assert!(t.round(1).is_some());
    assert!(t.round(2).is_none());
}
