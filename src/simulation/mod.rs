//! Simulated games against scripted players
//!
//! Used by the `simulate` command and by tests that check the bot actually
//! learns exploitable patterns.

pub mod players;
pub mod runner;

pub use players::{
    BeatLastPlayer, ConstantPlayer, CyclePlayer, PlayerKind, RandomPlayer, ScriptedPlayer,
};
pub use runner::{Simulation, SimulationSummary};
