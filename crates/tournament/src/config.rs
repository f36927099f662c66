//! Runner configuration, read from a TOML file.
//!
//! ```toml
//! data_dir = "tournaments"
//! strategy = "greedy"
//! log_filter = "info"
//!
//! [simulation]
//! players = 9
//! outcome = "random"
//! seed = 7
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swiss_core::PairingStrategy;
use tracing::debug;

use crate::error::TournamentResult;
use crate::simulation::SimulationConfig;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "swiss.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Directory holding one JSON file per tournament
    pub data_dir: PathBuf,
    /// Pairing strategy for new rounds
    pub strategy: PairingStrategy,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_filter: String,
    pub simulation: SimulationConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("tournaments"),
            strategy: PairingStrategy::Greedy,
            log_filter: "info".to_string(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl TournamentConfig {
    pub fn from_toml(contents: &str) -> TournamentResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> TournamentResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> TournamentResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
