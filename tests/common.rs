//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use roshambo::{
    Error,
    app::SessionConfig,
    policy::ArgMaxSampler,
    ports::{RetrainOutcome, SessionObserver},
    rps::{HistoryLog, Move},
    session::{GameSession, RoundResult},
};

/// Parse a compact move string such as `"RRPS"`.
pub fn moves(letters: &str) -> Vec<Move> {
    letters
        .chars()
        .map(|c| c.to_string().parse().expect("valid move letter"))
        .collect()
}

/// History in which the bot always threw `Paper`.
pub fn history_of(player_moves: &[Move]) -> HistoryLog {
    let mut history = HistoryLog::new();
    for &mv in player_moves {
        history.record(mv, Move::Paper);
    }
    history
}

/// Session that always plays the highest-weight move.
pub fn deterministic_session(config: SessionConfig) -> GameSession {
    GameSession::new(config)
        .expect("valid config")
        .with_sampler(ArgMaxSampler)
}

pub fn play_all(session: &mut GameSession, player_moves: &[Move]) -> Vec<RoundResult> {
    player_moves
        .iter()
        .map(|&mv| session.play_round(mv).expect("round succeeds"))
        .collect()
}

/// Observer that records events as strings, shared across clones.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.starts_with(prefix))
            .count()
    }
}

impl SessionObserver for RecordingObserver {
    fn on_round(&mut self, result: &RoundResult) {
        self.events
            .lock()
            .unwrap()
            .push(format!("round {}", result.round));
    }

    fn on_retrain(&mut self, round: u64, predictor: &str, outcome: &RetrainOutcome) {
        self.events.lock().unwrap().push(format!(
            "retrain {predictor} at {round} trained={}",
            outcome.trained()
        ));
    }

    fn on_persistence_failure(&mut self, error: &Error) {
        self.events
            .lock()
            .unwrap()
            .push(format!("persistence failure: {error}"));
    }
}
