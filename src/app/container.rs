//! Dependency injection container for roshambo sessions.
//!
//! The container owns infrastructure dependencies (the state repository and
//! observers every session gets) and provides factory methods for creating
//! and restoring sessions.

use std::{path::Path, sync::Arc};

use tracing::{info, warn};

use super::config::SessionConfig;
use crate::{
    Result,
    adapters::{MsgPackRepository, TracingObserver},
    error::Error,
    ports::{Predictor, SessionObserver, StatePiece, StateRepository},
    rps::HistoryLog,
    session::{
        GameSession, SavedHistory, SavedModel, SavedStats, SessionStats, load_piece,
    },
};

type ObserverFactory = Arc<dyn Fn() -> Box<dyn SessionObserver> + Send + Sync>;

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use roshambo::app::{App, SessionConfig};
///
/// let app = App::with_state_dir("game-state");
/// let mut session = app.restore_session(SessionConfig::default())?;
/// session.play_round_str("rock")?;
/// session.save()?;
/// # Ok::<(), roshambo::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use roshambo::app::{App, SessionConfig};
/// use roshambo::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// let session = app.restore_session(SessionConfig::default())?;
/// assert_eq!(session.history().len(), 0);
/// # Ok::<(), roshambo::Error>(())
/// ```
pub struct App {
    /// Where sessions persist their state (None = in-process only)
    repository: Option<Arc<dyn StateRepository + Send + Sync>>,
    /// Observers attached to every session
    observers: Vec<ObserverFactory>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create an app without persistence.
    ///
    /// Sessions log through [`TracingObserver`].
    pub fn new() -> Self {
        AppBuilder::new().with_tracing().build()
    }

    /// Create an app persisting to a MessagePack state directory.
    pub fn with_state_dir(dir: impl AsRef<Path>) -> Self {
        AppBuilder::new()
            .with_repository(MsgPackRepository::new(dir.as_ref()))
            .with_tracing()
            .build()
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the state repository, if any.
    pub fn repository(&self) -> Option<Arc<dyn StateRepository + Send + Sync>> {
        self.repository.clone()
    }

    fn effective_config(&self, mut config: SessionConfig) -> SessionConfig {
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        config
    }

    fn wire(&self, mut session: GameSession) -> GameSession {
        if let Some(repository) = &self.repository {
            session = session.with_repository(Arc::clone(repository));
        }
        for make in &self.observers {
            session.add_observer(make());
        }
        session
    }

    /// Create a fresh session, ignoring any persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid configuration.
    pub fn create_session(&self, config: SessionConfig) -> Result<GameSession> {
        let session = GameSession::new(self.effective_config(config))?;
        Ok(self.wire(session))
    }

    /// Create a session from persisted state.
    ///
    /// History, statistics and model are restored independently. A missing
    /// piece starts from its default. A piece that cannot be read, decoded or
    /// applied to the configured predictor is logged, reported to the
    /// session's observers and replaced by its default; it never aborts the
    /// restore. When no usable model survives but history does, the fresh
    /// predictor is refit on that history immediately.
    ///
    /// # Errors
    ///
    /// Only an invalid configuration is an error.
    pub fn restore_session(&self, config: SessionConfig) -> Result<GameSession> {
        let config = self.effective_config(config);
        config.validate()?;

        let Some(repository) = &self.repository else {
            return self.create_session(config);
        };

        let mut failures = Vec::new();

        let history = load_piece::<SavedHistory>(repository.as_ref(), &mut failures)
            .map(SavedHistory::into_log)
            .unwrap_or_else(HistoryLog::new);

        let stats = load_piece::<SavedStats>(repository.as_ref(), &mut failures)
            .map(|saved| saved.stats)
            .unwrap_or_else(SessionStats::new);

        let mut predictor: Box<dyn Predictor> = config.build_predictor();
        let mut model_restored = false;
        if let Some(saved) = load_piece::<SavedModel>(repository.as_ref(), &mut failures) {
            match predictor.import_state(saved.state, saved.retrain_count) {
                Ok(()) => model_restored = true,
                Err(err) => {
                    warn!(piece = %StatePiece::Model, error = %err, "discarding saved model");
                    predictor = config.build_predictor();
                    failures.push(err);
                }
            }
        }
        if !model_restored && !history.is_empty() {
            refit(predictor.as_mut(), &history, &mut failures);
        }

        info!(
            rounds = history.len(),
            games_played = stats.games_played(),
            predictor = predictor.name(),
            retrain_count = predictor.retrain_count(),
            degraded = failures.len(),
            "session restored"
        );

        let session = GameSession::from_state(config, history, stats, predictor)?;
        let mut session = self.wire(session);
        for failure in &failures {
            session.report_persistence_failure(failure);
        }
        Ok(session)
    }
}

/// Fit a fresh predictor on restored history so it does not wait for the
/// next retrain round.
fn refit(predictor: &mut dyn Predictor, history: &HistoryLog, failures: &mut Vec<Error>) {
    match predictor.retrain(history) {
        Ok(outcome) => info!(
            predictor = predictor.name(),
            rounds = history.len(),
            trained = outcome.trained(),
            "refit predictor on restored history"
        ),
        Err(err) => {
            warn!(predictor = predictor.name(), error = %err, "refit on restored history failed");
            failures.push(err);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject in-memory repositories, recording
/// observers and fixed seeds.
#[derive(Default)]
pub struct AppBuilder {
    repository: Option<Arc<dyn StateRepository + Send + Sync>>,
    observers: Vec<ObserverFactory>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state repository.
    pub fn with_repository<R: StateRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Attach an observer to every session; `make` is called once per session.
    pub fn with_observer<F>(mut self, make: F) -> Self
    where
        F: Fn() -> Box<dyn SessionObserver> + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(make));
        self
    }

    /// Log session events through `tracing`.
    pub fn with_tracing(self) -> Self {
        self.with_observer(|| Box::new(TracingObserver::new()))
    }

    /// Set a default random seed for sessions whose config has none.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    pub fn build(self) -> App {
        App {
            repository: self.repository,
            observers: self.observers,
            default_seed: self.default_seed,
        }
    }
}
