//! Sequence model over a sliding window of player moves

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{ModelState, Prediction, Predictor, RetrainOutcome},
    rps::{HistoryLog, Move, moves::MOVE_COUNT},
    sequence::network::{Network, Sample},
};

/// Hyperparameters of the sequence network and its retraining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Hidden layer width
    pub hidden: usize,
    /// Passes over the training set per retrain
    pub epochs: usize,
    /// SGD step size
    pub learning_rate: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            hidden: 16,
            epochs: 30,
            learning_rate: 0.1,
        }
    }
}

/// Predicts the player's next move from the last `window` moves.
#[derive(Debug, Clone)]
pub struct SequenceModel {
    network: Network,
    window: usize,
    params: TrainingParams,
    retrain_count: u64,
}

impl SequenceModel {
    /// Create a model with freshly initialised parameters.
    ///
    /// # Arguments
    ///
    /// * `window` - Number of recent moves fed to the network
    /// * `params` - Network width and training schedule
    /// * `seed` - Seed for parameter initialisation (`None` = OS entropy)
    pub fn new(window: usize, params: TrainingParams, seed: Option<u64>) -> Self {
        Self {
            network: Network::new(window, params.hidden, seed),
            window,
            params,
            retrain_count: 0,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn params(&self) -> TrainingParams {
        self.params
    }

    /// Slide a window across the player moves: each window is labelled with
    /// the move immediately after it.
    pub fn training_set(history: &HistoryLog, window: usize) -> Vec<Sample> {
        if window == 0 {
            return Vec::new();
        }
        let moves: Vec<Move> = history.player_moves().collect();
        moves
            .windows(window + 1)
            .map(|chunk| Sample {
                window: chunk[..window].to_vec(),
                label: chunk[window],
            })
            .collect()
    }

    /// Predicted distribution over the player's next move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] when fewer than `window` moves exist.
    pub fn predict_distribution(&self, history: &HistoryLog) -> Result<[f64; MOVE_COUNT]> {
        let window = history
            .window(self.window)
            .ok_or(Error::InsufficientData {
                required: self.window,
                available: history.len(),
            })?;
        Ok(self.network.probabilities(&window))
    }

    /// Fit the current parameters on an explicit sample set.
    ///
    /// Used for offline pretraining; counts as one retrain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if a sample's window length
    /// differs from the model's.
    pub fn pretrain(&mut self, samples: &[Sample]) -> Result<RetrainOutcome> {
        if let Some(bad) = samples.iter().find(|s| s.window.len() != self.window) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "sample window of {} moves does not match model window {}",
                    bad.window.len(),
                    self.window
                ),
            });
        }
        Ok(self.fit(samples))
    }

    fn fit(&mut self, samples: &[Sample]) -> RetrainOutcome {
        if samples.is_empty() {
            return RetrainOutcome::Skipped {
                required: 1,
                available: 0,
            };
        }
        let loss = self
            .network
            .fit(samples, self.params.epochs, self.params.learning_rate);
        self.retrain_count += 1;
        RetrainOutcome::Trained {
            samples: samples.len(),
            loss,
        }
    }
}

impl Predictor for SequenceModel {
    fn predict(&self, history: &HistoryLog) -> Prediction {
        match self.predict_distribution(history) {
            Ok(probs) => Prediction::Move(Move::from_scores(&probs)),
            Err(_) => Prediction::Uniform,
        }
    }

    fn retrain(&mut self, history: &HistoryLog) -> Result<RetrainOutcome> {
        let required = self.window + 1;
        if history.len() < required {
            return Ok(RetrainOutcome::Skipped {
                required,
                available: history.len(),
            });
        }
        let samples = Self::training_set(history, self.window);
        Ok(self.fit(&samples))
    }

    fn name(&self) -> &str {
        "sequence"
    }

    fn retrain_count(&self) -> u64 {
        self.retrain_count
    }

    fn export_state(&self) -> ModelState {
        ModelState::Sequence(self.network.clone())
    }

    fn import_state(&mut self, state: ModelState, retrain_count: u64) -> Result<()> {
        match state {
            ModelState::Sequence(network) => {
                if network.window() != self.window || !network.is_well_formed() {
                    return Err(Error::ModelMismatch {
                        expected: format!("sequence network over {} moves", self.window),
                        found: format!(
                            "sequence network over {} moves ({} hidden units)",
                            network.window(),
                            network.hidden()
                        ),
                    });
                }
                self.network = network;
                self.retrain_count = retrain_count;
                Ok(())
            }
            other => Err(Error::ModelMismatch {
                expected: "sequence".to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
