//! Probability distribution over the bot's move

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    rps::{Move, moves::MOVE_COUNT},
};

/// Allowed deviation of a distribution's total from 1.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

/// Weights over rock, paper, scissors that are non-negative and sum to 1.
///
/// Recomputed every round; never carried across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseDistribution {
    weights: [f64; MOVE_COUNT],
}

impl ResponseDistribution {
    /// Validate and wrap a weight vector indexed by [`Move::index`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDistribution`] for negative or non-finite
    /// weights, or when the weights do not sum to 1 within
    /// [`DISTRIBUTION_TOLERANCE`]. Weights are never silently renormalised.
    pub fn new(weights: [f64; MOVE_COUNT]) -> Result<Self> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(Error::InvalidDistribution {
                reason: format!("weight {bad} is negative or not finite"),
            });
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(Error::InvalidDistribution {
                reason: format!("weights sum to {total}, expected 1"),
            });
        }
        Ok(Self { weights })
    }

    /// The flat 1/3 distribution used when there is no prediction.
    pub fn uniform() -> Self {
        Self {
            weights: [1.0 / MOVE_COUNT as f64; MOVE_COUNT],
        }
    }

    /// All weight on a single move.
    pub fn certain(mv: Move) -> Self {
        Self { weights: mv.one_hot() }
    }

    pub fn weight(&self, mv: Move) -> f64 {
        self.weights[mv.index()]
    }

    pub fn weights(&self) -> [f64; MOVE_COUNT] {
        self.weights
    }

    /// `(move, weight)` pairs in priority order.
    pub fn pairs(&self) -> [(Move, f64); MOVE_COUNT] {
        Move::ALL.map(|mv| (mv, self.weight(mv)))
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn is_uniform(&self) -> bool {
        self.weights
            .iter()
            .all(|w| (w - 1.0 / MOVE_COUNT as f64).abs() <= DISTRIBUTION_TOLERANCE)
    }

    /// Highest-weight move, ties resolved rock, paper, scissors.
    pub fn most_likely(&self) -> Move {
        Move::from_scores(&self.weights)
    }

    /// Re-run the invariants; used before sampling distributions that may
    /// have been deserialized.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.weights).map(|_| ())
    }
}

impl Default for ResponseDistribution {
    fn default() -> Self {
        Self::uniform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sums_to_one() {
        let uniform = ResponseDistribution::uniform();
        assert!((uniform.total() - 1.0).abs() <= DISTRIBUTION_TOLERANCE);
        assert!(uniform.is_uniform());
        assert_eq!(uniform.most_likely(), Move::Rock);
    }

    #[test]
    fn rejects_weights_that_do_not_sum_to_one() {
        assert!(matches!(
            ResponseDistribution::new([0.5, 0.5, 0.5]),
            Err(Error::InvalidDistribution { .. })
        ));
        assert!(ResponseDistribution::new([0.2, 0.2, 0.2]).is_err());
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(ResponseDistribution::new([1.2, -0.2, 0.0]).is_err());
        assert!(ResponseDistribution::new([f64::NAN, 0.5, 0.5]).is_err());
    }

    #[test]
    fn accepts_tiny_rounding_error() {
        let dist = ResponseDistribution::new([0.1, 0.6, 0.3]).unwrap();
        assert_eq!(dist.weight(Move::Paper), 0.6);
        assert_eq!(dist.most_likely(), Move::Paper);
    }

    #[test]
    fn certain_puts_all_mass_on_one_move() {
        let dist = ResponseDistribution::certain(Move::Scissors);
        assert_eq!(dist.weights(), [0.0, 0.0, 1.0]);
        assert!(dist.validate().is_ok());
    }
}
