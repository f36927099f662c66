//! Swiss Tournament Runner
//!
//! This crate provides infrastructure for:
//! - Storing tournaments (roster + round history) with optimistic versioning
//! - Driving the ladder/pairing loop from `swiss_core` one round at a time
//! - Simulating whole tournaments and generating text reports
//!
//! # Usage
//!
//! ```bash
//! # Create a tournament and pair the first round
//! cargo run -p tournament -- new "Club night" Alice Bob Carol
//! cargo run -p tournament -- pair "Club night"
//!
//! # Record a result and show the standings
//! cargo run -p tournament -- result "Club night" --round 1 --player Bob --winner Carol
//! cargo run -p tournament -- ladder "Club night"
//!
//! # Simulate a nine-player event
//! cargo run -p tournament -- simulate --players 9
//! ```

mod config;
mod error;
pub mod logging;
mod report;
mod simulation;
mod store;
mod tournament;

pub use config::*;
pub use error::*;
pub use report::*;
pub use simulation::*;
pub use store::*;
pub use tournament::*;
