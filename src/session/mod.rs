//! Game sessions
//!
//! A [`GameSession`] owns one player's history, statistics and predictor and
//! runs the round loop. Statistics snapshots and the persisted state pieces
//! live alongside it.

pub mod game;
pub mod snapshot;
pub mod stats;

pub use game::{GameSession, RoundResult};
pub use snapshot::{
    SavedHistory, SavedModel, SavedStats, Versioned, load_piece, read_piece, write_piece,
};
pub use stats::{MoveCounts, SessionState, SessionStats, StatsSnapshot};
