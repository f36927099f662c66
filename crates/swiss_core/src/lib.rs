//! Swiss-system tournament core
//!
//! Two pure functions, called once per round by the owner of the round
//! history:
//! - [`compute_ladder`] folds the history into ranked standings
//! - [`generate_round`] pairs the next round without repeating a pairing
//!
//! # Usage
//!
//! ```
//! use swiss_core::{compute_ladder, generate_round, Player};
//!
//! let players = vec![Player::new("a", "A"), Player::new("b", "B"), Player::new("c", "C")];
//! let mut rounds = Vec::new();
//!
//! let ladder = compute_ladder(&players, &rounds).unwrap();
//! let mut round = generate_round(&ladder, &rounds).unwrap();
//! round.resolve_byes();
//! rounds.push(round);
//! ```

pub mod error;
pub mod ladder;
pub mod pairing;
pub mod types;
pub mod validate;

pub use error::*;
pub use ladder::*;
pub use pairing::*;
pub use types::*;
pub use validate::validate_history;
