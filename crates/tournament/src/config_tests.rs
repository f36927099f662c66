use super::*;
use crate::error::TournamentError;
use crate::simulation::Outcome;
use tempfile::TempDir;

#[test]
fn test_empty_config_is_default() {
    let config = TournamentConfig::from_toml("").unwrap();
    assert_eq!(config, TournamentConfig::default());
    assert_eq!(config.simulation.round_count(), 8);
}

#[test]
fn test_partial_config() {
    let config = TournamentConfig::from_toml(
        r#"
        strategy = "backtracking"

        [simulation]
        players = 12
        rounds = 4
        outcome = "random"
        seed = 7
        "#,
    )
    .unwrap();

    assert_eq!(config.strategy, PairingStrategy::Backtracking);
    assert_eq!(config.data_dir, PathBuf::from("tournaments"));
    assert_eq!(config.simulation.players, 12);
    assert_eq!(config.simulation.round_count(), 4);
    assert_eq!(config.simulation.outcome, Outcome::Random);
    assert_eq!(config.simulation.seed, 7);
    assert_eq!(config.simulation.name, "Simulation");
}

#[test]
fn test_unknown_strategy_is_rejected() {
    let err = TournamentConfig::from_toml(r#"strategy = "swiss-dutch""#).unwrap_err();
    assert!(matches!(err, TournamentError::Config(_)));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = TournamentConfig::load_or_default(&dir.path().join("swiss.toml")).unwrap();
    assert_eq!(config, TournamentConfig::default());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("swiss.toml");
    std::fs::write(&path, "data_dir = \"/srv/swiss\"\nlog_filter = \"debug\"\n").unwrap();

    let config = TournamentConfig::load_or_default(&path).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/srv/swiss"));
    assert_eq!(config.log_filter, "debug");
}
