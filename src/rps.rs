//! Rock-paper-scissors primitives
//!
//! Moves and their one-hot codec, round outcomes, and the append-only
//! history every predictor reads from.

pub mod history;
pub mod moves;
pub mod outcome;

pub use history::{HistoryLog, Round};
pub use moves::Move;
pub use outcome::Outcome;
