//! Observer port - the observability channel of a game session
//!
//! Sessions report completed rounds, retrains and persistence failures to
//! every registered observer. A failed save never fails the round, so this
//! channel is where that condition becomes visible.

use crate::{Error, ports::RetrainOutcome, session::RoundResult};

/// Observer trait for monitoring a session
///
/// # Event Sequence
///
/// For every round:
/// 1. `on_retrain(...)` - only on rounds that hit the retrain cadence
/// 2. `on_persistence_failure(...)` - only if the post-retrain save failed
/// 3. `on_round(...)` - always, with the result returned to the caller
///
/// `on_persistence_failure` is also called when a piece of persisted state
/// could not be restored and was replaced by its default.
///
/// # Examples
///
/// ```
/// use roshambo::{ports::SessionObserver, session::RoundResult};
///
/// struct Counter {
///     rounds: usize,
/// }
///
/// impl SessionObserver for Counter {
///     fn on_round(&mut self, _result: &RoundResult) {
///         self.rounds += 1;
///     }
/// }
/// ```
pub trait SessionObserver: Send {
    /// Called after a round has been fully processed.
    fn on_round(&mut self, _result: &RoundResult) {}

    /// Called after the active predictor was asked to retrain.
    ///
    /// # Parameters
    ///
    /// * `round` - Number of rounds in the history when retraining ran
    /// * `predictor` - Name of the active predictor
    /// * `outcome` - Whether parameters were refit or left untouched
    fn on_retrain(&mut self, _round: u64, _predictor: &str, _outcome: &RetrainOutcome) {}

    /// Called when saving or restoring persisted state failed.
    fn on_persistence_failure(&mut self, _error: &Error) {}
}
