//! Configuration types for session creation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    markov::TransitionModel,
    policy::{CounterWeights, Shaping},
    ports::Predictor,
    sequence::{SequenceModel, TrainingParams},
};

/// Which prediction strategy a session runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorKind {
    /// First-order transition counts
    #[default]
    Markov,
    /// Windowed sequence network
    Sequence,
}

impl PredictorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PredictorKind::Markov => "markov",
            PredictorKind::Sequence => "sequence",
        }
    }
}

/// Configuration for creating a game session.
///
/// Every constant that shapes behaviour lives here with the documented
/// default, so a session built from `SessionConfig::default()` plays the
/// reference game.
///
/// # Examples
///
/// ```
/// use roshambo::app::{PredictorKind, SessionConfig};
/// use roshambo::policy::Shaping;
///
/// let config = SessionConfig::new(PredictorKind::Sequence)
///     .with_seed(42)
///     .with_shaping(Shaping::DeterministicCounter)
///     .with_retrain_interval(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Active prediction strategy
    pub strategy: PredictorKind,
    /// How predictions become response distributions
    pub shaping: Shaping,
    /// Retrain whenever the history length is a multiple of this
    pub retrain_interval: u64,
    /// Rounds the transition model needs before it predicts
    pub min_history: usize,
    /// Moves fed to the sequence model
    pub window: usize,
    /// Recent player moves included in statistics snapshots
    pub stats_window: usize,
    /// Sequence network size and training schedule
    pub training: TrainingParams,
    /// Random seed for the sampler and network initialisation
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(strategy: PredictorKind) -> Self {
        Self {
            strategy,
            shaping: Shaping::default(),
            retrain_interval: 10,
            min_history: 5,
            window: 5,
            stats_window: 10,
            training: TrainingParams::default(),
            seed: None,
        }
    }

    /// Read a JSON configuration file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_shaping(mut self, shaping: Shaping) -> Self {
        self.shaping = shaping;
        self
    }

    pub fn with_counter_weights(mut self, weights: CounterWeights) -> Self {
        self.shaping = Shaping::WeightedCounter(weights);
        self
    }

    pub fn with_retrain_interval(mut self, interval: u64) -> Self {
        self.retrain_interval = interval;
        self
    }

    pub fn with_min_history(mut self, min_history: usize) -> Self {
        self.min_history = min_history;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_stats_window(mut self, stats_window: usize) -> Self {
        self.stats_window = stats_window;
        self
    }

    pub fn with_training(mut self, training: TrainingParams) -> Self {
        self.training = training;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations a session cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(Error::InvalidConfiguration {
                message: message.to_string(),
            })
        };

        if self.retrain_interval == 0 {
            return invalid("retrain_interval must be at least 1");
        }
        if self.window == 0 {
            return invalid("window must be at least 1");
        }
        if self.training.hidden == 0 {
            return invalid("training.hidden must be at least 1");
        }
        if self.training.epochs == 0 {
            return invalid("training.epochs must be at least 1");
        }
        if !self.training.learning_rate.is_finite() || self.training.learning_rate <= 0.0 {
            return invalid("training.learning_rate must be a positive number");
        }
        if let Shaping::WeightedCounter(weights) = self.shaping {
            weights.validate()?;
        }
        Ok(())
    }

    /// Fresh, untrained predictor for the configured strategy.
    pub fn build_predictor(&self) -> Box<dyn Predictor> {
        match self.strategy {
            PredictorKind::Markov => Box::new(TransitionModel::new(self.min_history)),
            PredictorKind::Sequence => {
                Box::new(SequenceModel::new(self.window, self.training, self.seed))
            }
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(PredictorKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let config = SessionConfig::default();
        assert_eq!(config.strategy, PredictorKind::Markov);
        assert_eq!(config.retrain_interval, 10);
        assert_eq!(config.min_history, 5);
        assert_eq!(config.window, 5);
        assert_eq!(
            config.shaping,
            Shaping::WeightedCounter(CounterWeights::new(0.6, 0.1, 0.3))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_interval_and_window() {
        assert!(
            SessionConfig::default()
                .with_retrain_interval(0)
                .validate()
                .is_err()
        );
        assert!(SessionConfig::default().with_window(0).validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_training_params() {
        let bad_lr = SessionConfig::default().with_training(TrainingParams {
            learning_rate: f64::NAN,
            ..TrainingParams::default()
        });
        assert!(bad_lr.validate().is_err());

        let no_epochs = SessionConfig::default().with_training(TrainingParams {
            epochs: 0,
            ..TrainingParams::default()
        });
        assert!(no_epochs.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_weights() {
        let config =
            SessionConfig::default().with_counter_weights(CounterWeights::new(0.2, 0.5, 0.3));
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"strategy": "sequence", "seed": 7}"#).unwrap();
        assert_eq!(config.strategy, PredictorKind::Sequence);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.retrain_interval, 10);
    }

    #[test]
    fn json_file_is_validated() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"retrain_interval": 0}"#).unwrap();
        assert!(SessionConfig::from_json_file(&path).is_err());

        std::fs::write(&path, r#"{"shaping": "deterministic_counter"}"#).unwrap();
        let config = SessionConfig::from_json_file(&path).unwrap();
        assert_eq!(config.shaping, Shaping::DeterministicCounter);
    }

    #[test]
    fn builds_the_configured_predictor() {
        assert_eq!(SessionConfig::default().build_predictor().name(), "markov");
        assert_eq!(
            SessionConfig::new(PredictorKind::Sequence)
                .build_predictor()
                .name(),
            "sequence"
        );
    }
}
