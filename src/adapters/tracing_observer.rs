//! Observer that forwards session events to `tracing`.

use tracing::{info, warn};

use crate::{
    Error,
    ports::{RetrainOutcome, SessionObserver},
    session::RoundResult,
};

/// Emits one structured event per round, retrain and persistence failure.
///
/// Rounds are logged at `info` under the `roshambo::rounds` target so they
/// can be enabled separately from the library's own diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl SessionObserver for TracingObserver {
    fn on_round(&mut self, result: &RoundResult) {
        info!(
            target: "roshambo::rounds",
            round = result.round,
            player = %result.player_move,
            bot = %result.bot_move,
            outcome = %result.outcome,
            wins = result.stats.wins,
            losses = result.stats.losses,
            ties = result.stats.ties,
            "round"
        );
    }

    fn on_retrain(&mut self, round: u64, predictor: &str, outcome: &RetrainOutcome) {
        info!(
            target: "roshambo::rounds",
            round,
            predictor,
            trained = outcome.trained(),
            "retrain"
        );
    }

    fn on_persistence_failure(&mut self, error: &Error) {
        warn!(target: "roshambo::rounds", error = %error, "persistence failure");
    }
}
