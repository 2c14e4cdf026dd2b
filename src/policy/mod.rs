//! Response policy
//!
//! Turns a prediction of the player's next move into a distribution over the
//! bot's own move and samples a concrete move from it.
//!
//! | Shaping               | predicted | counter | remaining |
//! |-----------------------|-----------|---------|-----------|
//! | deterministic counter | 0.0       | 1.0     | 0.0       |
//! | weighted counter      | 0.1       | 0.6     | 0.3       |
//!
//! "Remaining" is the move the predicted move beats. With no prediction the
//! flat distribution is used.

pub mod distribution;
pub mod response;
pub mod sampler;

pub use distribution::{DISTRIBUTION_TOLERANCE, ResponseDistribution};
pub use response::{CounterWeights, ResponsePolicy, Shaping};
pub use sampler::{ArgMaxSampler, MoveSampler, RandomSampler};
