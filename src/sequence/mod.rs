//! Windowed sequence prediction
//!
//! A small feed-forward network maps the one-hot encoding of the player's
//! last `W` moves to a distribution over the player's next move. It captures
//! short-range patterns a first-order transition table cannot see.
//!
//! ## Architecture
//!
//! | Layer  | Shape          | Activation |
//! |--------|----------------|------------|
//! | input  | `W × 3`        | one-hot    |
//! | hidden | `hidden`       | ReLU       |
//! | output | `3`            | softmax    |
//!
//! Training minimises categorical cross-entropy with plain SGD over a fixed
//! number of in-order passes, so a retrain is fully determined by the
//! starting parameters and the history.

pub mod model;
pub mod network;
pub mod synthetic;

pub use model::{SequenceModel, TrainingParams};
pub use network::{Network, Sample};
