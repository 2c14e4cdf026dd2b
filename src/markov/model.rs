//! Transition model over the player's move history

use crate::{
    Error, Result,
    markov::table::TransitionTable,
    ports::{ModelState, Prediction, Predictor, RetrainOutcome},
    rps::{HistoryLog, Move},
};

/// Predicts the player's next move from first-order transition counts.
///
/// The table is only refreshed by [`TransitionModel::rebuild`], which the
/// session runs on its retrain cadence; between retrains predictions read the
/// table as of the last rebuild. Until the first rebuild there is no signal at
/// all and the model predicts [`Prediction::Uniform`].
#[derive(Debug, Clone)]
pub struct TransitionModel {
    table: TransitionTable,
    min_history: usize,
    retrain_count: u64,
}

impl TransitionModel {
    /// Create an empty model that refuses to predict below `min_history` rounds.
    pub fn new(min_history: usize) -> Self {
        Self {
            table: TransitionTable::new(),
            min_history,
            retrain_count: 0,
        }
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn min_history(&self) -> usize {
        self.min_history
    }

    /// Whether the table holds any counted transitions.
    pub fn is_built(&self) -> bool {
        self.table.total() > 0
    }

    fn ensure_history(&self, history: &HistoryLog) -> Result<()> {
        let required = self.min_history.max(1);
        if history.len() < required {
            return Err(Error::InsufficientData {
                required,
                available: history.len(),
            });
        }
        Ok(())
    }

    /// Reset the table and recount every consecutive pair of player moves.
    ///
    /// Below the minimum history the table is left exactly as it was.
    pub fn rebuild(&mut self, history: &HistoryLog) -> RetrainOutcome {
        if let Err(Error::InsufficientData {
            required,
            available,
        }) = self.ensure_history(history)
        {
            return RetrainOutcome::Skipped {
                required,
                available,
            };
        }

        self.table = TransitionTable::from_moves(history.player_moves());
        RetrainOutcome::Trained {
            samples: history.len().saturating_sub(1),
            loss: None,
        }
    }

    /// Most likely successor of `last_move` according to the current table.
    pub fn predict_from(&self, last_move: Move) -> Move {
        self.table.most_likely_next(last_move)
    }

    /// Predict the move following the last recorded player move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] below the minimum history.
    pub fn predict_next(&self, history: &HistoryLog) -> Result<Move> {
        self.ensure_history(history)?;
        let last = history.last_player_move().ok_or(Error::InsufficientData {
            required: 1,
            available: 0,
        })?;
        Ok(self.predict_from(last))
    }
}

impl Predictor for TransitionModel {
    fn predict(&self, history: &HistoryLog) -> Prediction {
        if !self.is_built() {
            return Prediction::Uniform;
        }
        match self.predict_next(history) {
            Ok(mv) => Prediction::Move(mv),
            Err(_) => Prediction::Uniform,
        }
    }

    fn retrain(&mut self, history: &HistoryLog) -> Result<RetrainOutcome> {
        let outcome = self.rebuild(history);
        if outcome.trained() {
            self.retrain_count += 1;
        }
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "markov"
    }

    fn retrain_count(&self) -> u64 {
        self.retrain_count
    }

    fn export_state(&self) -> ModelState {
        ModelState::Markov(self.table.clone())
    }

    fn import_state(&mut self, state: ModelState, retrain_count: u64) -> Result<()> {
        match state {
            ModelState::Markov(table) => {
                self.table = table;
                self.retrain_count = retrain_count;
                Ok(())
            }
            other => Err(Error::ModelMismatch {
                expected: "markov".to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
