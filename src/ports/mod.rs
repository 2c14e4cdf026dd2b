//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters in the
//! infrastructure layer: prediction strategies, persisted state storage, and
//! the observability channel a session reports through.

pub mod observer;
pub mod predictor;
pub mod repository;

pub use observer::SessionObserver;
pub use predictor::{ModelState, Prediction, Predictor, RetrainOutcome};
pub use repository::{StatePiece, StateRepository};
