//! Adaptive rock-paper-scissors opponent
//!
//! This crate provides:
//! - Moves, outcomes and the append-only round history
//! - Two interchangeable predictors of the player's next move: first-order
//!   transition counts and a windowed sequence network
//! - A response policy that turns predictions into weighted counter-moves
//! - Game sessions with periodic retraining, statistics and persistence
//! - Scripted players for simulations and a command-line front end

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod markov;
pub mod policy;
pub mod ports;
pub mod rps;
pub mod sequence;
pub mod session;
pub mod simulation;
pub mod utils;

pub use app::{App, PredictorKind, SessionConfig};
pub use error::{Error, Result};
pub use policy::{ResponseDistribution, ResponsePolicy, Shaping};
pub use ports::{Prediction, Predictor};
pub use rps::{HistoryLog, Move, Outcome, Round};
pub use session::{GameSession, RoundResult, StatsSnapshot};
