//! Predictor port - the polymorphic prediction capability
//!
//! A session and its response policy only ever talk to a `Predictor`, so the
//! first-order transition model and the windowed sequence model can be
//! swapped without touching any other component.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    markov::TransitionTable,
    rps::{HistoryLog, Move},
    sequence::Network,
};

/// What a predictor expects the player to throw next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    /// A concrete predicted player move
    Move(Move),
    /// Not enough history to claim a prediction; use the flat distribution
    Uniform,
}

impl Prediction {
    pub fn predicted_move(self) -> Option<Move> {
        match self {
            Prediction::Move(mv) => Some(mv),
            Prediction::Uniform => None,
        }
    }

    pub fn is_uniform(self) -> bool {
        matches!(self, Prediction::Uniform)
    }
}

/// Result of asking a predictor to retrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetrainOutcome {
    /// Parameters were refit
    Trained {
        /// Number of labelled samples (transitions or windows) consumed
        samples: usize,
        /// Mean training loss of the final pass, where the model has one
        loss: Option<f64>,
    },
    /// History too short; parameters left untouched
    Skipped { required: usize, available: usize },
}

impl RetrainOutcome {
    pub fn trained(&self) -> bool {
        matches!(self, RetrainOutcome::Trained { .. })
    }
}

/// Opaque trainable state of a predictor, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    Markov(TransitionTable),
    Sequence(Network),
}

impl ModelState {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelState::Markov(_) => "markov",
            ModelState::Sequence(_) => "sequence",
        }
    }
}

/// Unified interface for the prediction strategies.
///
/// # Examples
///
/// ```
/// use roshambo::{
///     markov::TransitionModel,
///     ports::{Prediction, Predictor},
///     rps::{HistoryLog, Move},
/// };
///
/// let model = TransitionModel::new(5);
/// let history = HistoryLog::new();
/// assert_eq!(model.predict(&history), Prediction::Uniform);
/// ```
pub trait Predictor: Send {
    /// Predict the player's next move from the rounds recorded so far.
    ///
    /// Returns [`Prediction::Uniform`] when the history is too short for the
    /// model to claim a prediction.
    fn predict(&self, history: &HistoryLog) -> Prediction;

    /// Refit the model against the full history.
    ///
    /// A history too short to train on leaves the current parameters intact
    /// and reports [`RetrainOutcome::Skipped`].
    fn retrain(&mut self, history: &HistoryLog) -> Result<RetrainOutcome>;

    /// Short identifier used in logs and persisted state.
    fn name(&self) -> &str;

    /// Number of completed retrains.
    fn retrain_count(&self) -> u64;

    /// Snapshot of the trainable state for persistence.
    fn export_state(&self) -> ModelState;

    /// Replace the trainable state with a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ModelMismatch`] if the snapshot belongs to a
    /// different kind of predictor or has incompatible dimensions.
    fn import_state(&mut self, state: ModelState, retrain_count: u64) -> Result<()>;

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
