//! First-order Markov prediction
//!
//! Counts player move transitions in a fixed 3×3 table and predicts the most
//! frequent successor of the player's last move.
//!
//! ## Usage Example
//!
//! ```
//! use roshambo::{
//!     markov::TransitionModel,
//!     ports::{Prediction, Predictor},
//!     rps::{HistoryLog, Move},
//! };
//!
//! let mut history = HistoryLog::new();
//! for mv in [Move::Rock, Move::Paper, Move::Rock, Move::Paper, Move::Rock] {
//!     history.record(mv, Move::Scissors);
//! }
//!
//! let mut model = TransitionModel::new(5);
//! model.retrain(&history)?;
//! assert_eq!(model.predict(&history), Prediction::Move(Move::Paper));
//! # Ok::<(), roshambo::Error>(())
//! ```

pub mod model;
pub mod table;

pub use model::TransitionModel;
pub use table::TransitionTable;
