//! Tournament CLI
//!
//! Create Swiss tournaments, pair rounds, record results and print standings.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swiss_core::{PairingStrategy, Player};
use tournament::{
    ladder_report, logging, round_report, tournament_report, JsonFileStore, MemoryStore,
    Outcome, SimulationConfig, Simulator, Tournament, TournamentConfig, TournamentStore,
    DEFAULT_CONFIG_FILE,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tournament", about = "Swiss-system tournament runner")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding tournament files (overrides the config)
    #[arg(long, env = "SWISS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a tournament with the given player names
    New {
        name: String,
        #[arg(required = true)]
        players: Vec<String>,
    },
    /// Print the current standings
    Ladder { name: String },
    /// Pair the next round
    Pair {
        name: String,
        /// greedy | backtracking (default from config)
        #[arg(long)]
        strategy: Option<PairingStrategy>,
    },
    /// Record the winner of a game
    #[command(name = "result")]
    Record {
        name: String,
        /// 1-based round number
        #[arg(long)]
        round: usize,
        /// Id or name of either player in the game
        #[arg(long)]
        player: String,
        /// Id or name of the winner
        #[arg(long)]
        winner: String,
    },
    /// Print every round and the standings
    Show { name: String },
    /// List stored tournaments
    List,
    /// Simulate a whole tournament in memory
    Simulate {
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        rounds: Option<usize>,
        /// Decide games by a seeded coin flip instead of "black wins"
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        strategy: Option<PairingStrategy>,
    },
}

fn open_store(cli: &Cli, config: &TournamentConfig) -> Result<JsonFileStore> {
    let dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());
    JsonFileStore::open(&dir)
        .with_context(|| format!("Failed to open data directory {}", dir.display()))
}

fn create(store: &JsonFileStore, name: &str, names: &[String]) -> Result<()> {
    let players = names
        .iter()
        .map(|n| Player::new(Uuid::new_v4().to_string(), n.as_str()))
        .collect();
    let tournament = Tournament::new(name, players)?;
    store.create(&tournament)?;

    println!("Created tournament: {}", name);
    for player in &tournament.players {
        println!("  {:<24} {}", player.name, player.id);
    }
    Ok(())
}

fn pair(store: &JsonFileStore, name: &str, strategy: PairingStrategy) -> Result<()> {
    let mut tournament = store.load(name)?;
    tournament.pair_next_round(strategy)?;
    store.save(&mut tournament)?;

    let number = tournament.rounds.len();
    if let Some(report) = round_report(&tournament, number) {
        print!("{}", report);
    }
    Ok(())
}

fn record(store: &JsonFileStore, name: &str, round: usize, player: &str, winner: &str) -> Result<()> {
    let mut tournament = store.load(name)?;
    let player = tournament.find_player(player)?.id.clone();
    let winner = tournament.find_player(winner)?.id.clone();

    tournament.record_result(round, &player, winner)?;
    store.save(&mut tournament)?;

    if let Some(report) = round_report(&tournament, round) {
        print!("{}", report);
    }
    Ok(())
}

fn simulate(sim: SimulationConfig, strategy: PairingStrategy) -> Result<()> {
    if sim.players == 0 {
        bail!("A simulation needs at least one player");
    }

    let store = MemoryStore::new();
    let report = Simulator::new(sim, strategy).run(&store)?;

    print!("{}", tournament_report(&report.tournament)?);
    if let Some(reason) = report.stopped_by {
        println!();
        println!("Stopped after {} rounds: {}", report.rounds_played, reason);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = TournamentConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to read config {}", cli.config.display()))?;
    logging::init(&config.log_filter);

    match &cli.command {
        Command::New { name, players } => create(&open_store(&cli, &config)?, name, players),
        Command::Ladder { name } => {
            let tournament = open_store(&cli, &config)?.load(name)?;
            print!("{}", ladder_report(&tournament.ladder()?));
            Ok(())
        }
        Command::Pair { name, strategy } => pair(
            &open_store(&cli, &config)?,
            name,
            strategy.unwrap_or(config.strategy),
        ),
        Command::Record {
            name,
            round,
            player,
            winner,
        } => record(&open_store(&cli, &config)?, name, *round, player, winner),
        Command::Show { name } => {
            let tournament = open_store(&cli, &config)?.load(name)?;
            print!("{}", tournament_report(&tournament)?);
            Ok(())
        }
        Command::List => {
            for name in open_store(&cli, &config)?.list()? {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Simulate {
            players,
            rounds,
            seed,
            strategy,
        } => {
            let mut sim = config.simulation.clone();
            if let Some(players) = players {
                sim.players = *players;
            }
            if rounds.is_some() {
                sim.rounds = *rounds;
            }
            if let Some(seed) = seed {
                sim.outcome = Outcome::Random;
                sim.seed = *seed;
            }
            simulate(sim, strategy.unwrap_or(config.strategy))
        }
    }
}
