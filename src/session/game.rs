//! Game session - the per-player round state machine

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    Result,
    app::SessionConfig,
    error::Error,
    policy::{MoveSampler, RandomSampler, ResponseDistribution, ResponsePolicy},
    ports::{Prediction, Predictor, RetrainOutcome, SessionObserver, StatePiece, StateRepository},
    rps::{HistoryLog, Move, Outcome},
    session::{
        snapshot::{SavedHistory, SavedModel, SavedStats, Versioned},
        stats::{SessionStats, StatsSnapshot},
    },
};

/// Everything the caller learns from one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// One-based round number
    pub round: u64,
    pub player_move: Move,
    pub bot_move: Move,
    pub outcome: Outcome,
    /// What the active predictor expected the player to throw
    pub prediction: Prediction,
    /// Distribution the bot move was drawn from
    pub distribution: ResponseDistribution,
    /// Whether this round hit the retrain cadence and the model was refit.
    /// The refit model is first used in the following round.
    pub retrained: bool,
    pub stats: StatsSnapshot,
}

/// One player's game: history, statistics and the active predictor.
///
/// Each session owns all of its mutable state; concurrent players get
/// separate sessions.
///
/// # Round order
///
/// 1. Predict the player's move from the history so far
/// 2. Shape the prediction and sample the bot move
/// 3. Score the round, append it to the history and update statistics
/// 4. On the retrain cadence, refit the predictor and save state
///
/// # Examples
///
/// ```
/// use roshambo::{app::SessionConfig, rps::Move, session::GameSession};
///
/// let mut session = GameSession::new(SessionConfig::default().with_seed(1))?;
/// let result = session.play_round(Move::Rock)?;
/// assert_eq!(result.stats.games_played, 1);
/// # Ok::<(), roshambo::Error>(())
/// ```
pub struct GameSession {
    config: SessionConfig,
    history: HistoryLog,
    stats: SessionStats,
    predictor: Box<dyn Predictor>,
    policy: ResponsePolicy,
    sampler: Box<dyn MoveSampler>,
    repository: Option<Arc<dyn StateRepository + Send + Sync>>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl GameSession {
    /// Start a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is invalid.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let predictor = config.build_predictor();
        Self::from_state(config, HistoryLog::new(), SessionStats::new(), predictor)
    }

    /// Resume a session from previously recorded state.
    pub fn from_state(
        config: SessionConfig,
        history: HistoryLog,
        stats: SessionStats,
        predictor: Box<dyn Predictor>,
    ) -> Result<Self> {
        config.validate()?;
        let policy = ResponsePolicy::new(config.shaping)?;
        let sampler = Box::new(RandomSampler::new(config.seed));
        Ok(Self {
            config,
            history,
            stats,
            predictor,
            policy,
            sampler,
            repository: None,
            observers: Vec::new(),
        })
    }

    /// Persist state to `repository` after every retrain and on [`save`].
    ///
    /// [`save`]: GameSession::save
    pub fn with_repository(mut self, repository: Arc<dyn StateRepository + Send + Sync>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_observer<O: SessionObserver + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Replace the random sampler, e.g. with [`crate::policy::ArgMaxSampler`]
    /// for fully deterministic play.
    pub fn with_sampler<S: MoveSampler + 'static>(mut self, sampler: S) -> Self {
        self.sampler = Box::new(sampler);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn session_stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn predictor(&self) -> &dyn Predictor {
        self.predictor.as_ref()
    }

    pub fn policy(&self) -> &ResponsePolicy {
        &self.policy
    }

    /// Play one round against `player`.
    ///
    /// A failed save after a retrain is reported to observers and logged; the
    /// round result is still returned.
    pub fn play_round(&mut self, player: Move) -> Result<RoundResult> {
        let prediction = self.predictor.predict(&self.history);
        let (distribution, bot) = self.policy.respond(prediction, self.sampler.as_mut())?;

        let round = self.history.record(player, bot);
        self.stats.record(&round);
        let outcome = round.outcome();
        let number = round.index + 1;
        debug!(
            round = number,
            player = %player,
            bot = %bot,
            outcome = %outcome,
            "round played"
        );

        let mut retrained = false;
        if self.history.len() as u64 % self.config.retrain_interval == 0 {
            let retrain = self.retrain()?;
            retrained = retrain.trained();
            if let Err(err) = self.save() {
                self.report_persistence_failure(&err);
            }
        }

        let result = RoundResult {
            round: number,
            player_move: player,
            bot_move: bot,
            outcome,
            prediction,
            distribution,
            retrained,
            stats: self.stats(),
        };
        for observer in &mut self.observers {
            observer.on_round(&result);
        }
        Ok(result)
    }

    /// Parse and play a textual move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] without touching any state if `input` is
    /// not a move.
    pub fn play_round_str(&mut self, input: &str) -> Result<RoundResult> {
        let player: Move = input.parse()?;
        self.play_round(player)
    }

    fn retrain(&mut self) -> Result<RetrainOutcome> {
        let outcome = self.predictor.retrain(&self.history)?;
        let rounds = self.history.len() as u64;
        match outcome {
            RetrainOutcome::Trained { samples, loss } => info!(
                predictor = self.predictor.name(),
                retrain_count = self.predictor.retrain_count(),
                samples,
                loss,
                rounds,
                "predictor retrained"
            ),
            RetrainOutcome::Skipped {
                required,
                available,
            } => debug!(
                predictor = self.predictor.name(),
                required, available, "retrain skipped"
            ),
        }
        let name = self.predictor.name().to_string();
        for observer in &mut self.observers {
            observer.on_retrain(rounds, &name, &outcome);
        }
        Ok(outcome)
    }

    /// Read-only statistics query.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::new(
            &self.stats,
            self.history.recent_player_moves(self.config.stats_window),
            self.predictor.retrain_count(),
        )
    }

    /// Zero the statistics. History and model are left alone, so the retrain
    /// cadence is unaffected.
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::new();
        info!(rounds = self.history.len(), "session statistics reset");
    }

    /// Write history, statistics and model to the repository, if any.
    ///
    /// # Errors
    ///
    /// Returns the first persistence error; later pieces are still attempted.
    pub fn save(&self) -> Result<()> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };

        let pieces: [(StatePiece, Result<Vec<u8>>); 3] = [
            (
                StatePiece::History,
                SavedHistory::new(&self.history).to_bytes(),
            ),
            (StatePiece::Stats, SavedStats::new(&self.stats).to_bytes()),
            (
                StatePiece::Model,
                SavedModel::new(
                    self.predictor.export_state(),
                    self.predictor.retrain_count(),
                )
                .to_bytes(),
            ),
        ];

        let mut first_error: Option<Error> = None;
        for (piece, bytes) in pieces {
            let written = bytes.and_then(|bytes| repository.write(piece, &bytes));
            if let Err(err) = written {
                warn!(%piece, error = %err, "failed to save session state");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                debug!(rounds = self.history.len(), "session state saved");
                Ok(())
            }
        }
    }

    /// Log a persistence failure and forward it to every observer.
    pub fn report_persistence_failure(&mut self, error: &Error) {
        warn!(error = %error, "session state could not be persisted");
        for observer in &mut self.observers {
            observer.on_persistence_failure(error);
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("rounds", &self.history.len())
            .field("predictor", &self.predictor.name())
            .field("sampler", &self.sampler.name())
            .field("persistent", &self.repository.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        adapters::InMemoryRepository,
        app::PredictorKind,
        policy::{ArgMaxSampler, Shaping},
    };

    #[derive(Clone, Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl SessionObserver for Recorder {
        fn on_round(&mut self, result: &RoundResult) {
            self.events
                .lock()
                .unwrap()
                .push(format!("round {}", result.round));
        }

        fn on_retrain(&mut self, round: u64, predictor: &str, _outcome: &RetrainOutcome) {
            self.events
                .lock()
                .unwrap()
                .push(format!("retrain {predictor} {round}"));
        }

        fn on_persistence_failure(&mut self, _error: &Error) {
            self.events.lock().unwrap().push("save failed".to_string());
        }
    }

    struct BrokenRepository;

    impl StateRepository for BrokenRepository {
        fn write(&self, piece: StatePiece, _bytes: &[u8]) -> Result<()> {
            Err(Error::Io {
                operation: format!("write {piece}"),
                source: std::io::Error::other("disk full"),
            })
        }

        fn read(&self, _piece: StatePiece) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }
    }

    fn deterministic(config: SessionConfig) -> GameSession {
        GameSession::new(config).unwrap().with_sampler(ArgMaxSampler)
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let mut session = deterministic(SessionConfig::default());
        session.play_round(Move::Rock).unwrap();

        let err = session.play_round_str("lizard").unwrap_err();
        assert!(matches!(err, Error::InvalidMove { .. }));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.stats().games_played, 1);
    }

    #[test]
    fn short_history_uses_flat_distribution() {
        for strategy in [PredictorKind::Markov, PredictorKind::Sequence] {
            let mut session = deterministic(SessionConfig::new(strategy).with_seed(3));
            for mv in [Move::Rock, Move::Paper, Move::Scissors] {
                let result = session.play_round(mv).unwrap();
                assert_eq!(result.prediction, Prediction::Uniform);
                assert!(result.distribution.is_uniform());
            }
        }
    }

    #[test]
    fn retrain_happens_on_cadence_and_is_observed() {
        let recorder = Recorder::default();
        let mut session = deterministic(SessionConfig::default()).with_observer(recorder.clone());

        for i in 0..10 {
            let result = session.play_round(Move::from_index(i)).unwrap();
            assert_eq!(result.retrained, i == 9);
        }
        assert_eq!(session.predictor().retrain_count(), 1);

        let events = recorder.events.lock().unwrap();
        assert_eq!(events[9], "retrain markov 10");
        assert_eq!(events[10], "round 10");
        assert_eq!(events.len(), 11);
    }

    #[test]
    fn save_failure_is_reported_but_round_succeeds() {
        let recorder = Recorder::default();
        let mut session = deterministic(SessionConfig::default().with_retrain_interval(2))
            .with_repository(Arc::new(BrokenRepository))
            .with_observer(recorder.clone());

        session.play_round(Move::Rock).unwrap();
        let result = session.play_round(Move::Rock).unwrap();
        assert_eq!(result.round, 2);

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "round 1".to_string(),
                "retrain markov 2".to_string(),
                "save failed".to_string(),
                "round 2".to_string(),
            ]
        );
    }

    #[test]
    fn save_writes_all_pieces() {
        let repo = InMemoryRepository::new();
        let mut session =
            deterministic(SessionConfig::default()).with_repository(Arc::new(repo.clone()));
        session.play_round(Move::Paper).unwrap();
        session.save().unwrap();

        for piece in StatePiece::ALL {
            assert!(repo.contains(piece), "missing {piece}");
        }
    }

    #[test]
    fn reset_keeps_history_and_cadence() {
        let mut session = deterministic(SessionConfig::default());
        for _ in 0..7 {
            session.play_round(Move::Rock).unwrap();
        }
        session.reset_stats();
        assert_eq!(session.stats().games_played, 0);
        assert_eq!(session.history().len(), 7);
        assert_eq!(session.stats().last_moves.len(), 7);

        let mut retrained_at = None;
        for _ in 0..3 {
            let result = session.play_round(Move::Rock).unwrap();
            if result.retrained {
                retrained_at = Some(session.history().len());
            }
        }
        assert_eq!(retrained_at, Some(10));
        assert_eq!(session.stats().games_played, 3);
    }

    #[test]
    fn deterministic_shaping_counters_the_prediction() {
        let config = SessionConfig::default()
            .with_shaping(Shaping::DeterministicCounter)
            .with_retrain_interval(5);
        let mut session = deterministic(config);
        for _ in 0..5 {
            session.play_round(Move::Scissors).unwrap();
        }
        let result = session.play_round(Move::Scissors).unwrap();
        assert_eq!(result.prediction, Prediction::Move(Move::Scissors));
        assert_eq!(result.bot_move, Move::Rock);
        assert_eq!(result.outcome, Outcome::BotWin);
    }

    #[test]
    fn stats_window_limits_last_moves() {
        let mut session = deterministic(SessionConfig::default().with_stats_window(3));
        for i in 0..6 {
            session.play_round(Move::from_index(i)).unwrap();
        }
        assert_eq!(
            session.stats().last_moves,
            vec![Move::Rock, Move::Paper, Move::Scissors]
        );
    }
}
