//! Shaping a prediction into the bot's response

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    policy::{
        distribution::{DISTRIBUTION_TOLERANCE, ResponseDistribution},
        sampler::MoveSampler,
    },
    ports::Prediction,
    rps::{Move, moves::MOVE_COUNT},
};

/// Weights of the weighted-counter shaping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterWeights {
    /// Weight on the move that beats the predicted move (dominant)
    pub counter: f64,
    /// Weight on the predicted move itself
    pub predicted: f64,
    /// Weight on the move the predicted move beats
    pub remaining: f64,
}

impl CounterWeights {
    pub const fn new(counter: f64, predicted: f64, remaining: f64) -> Self {
        Self {
            counter,
            predicted,
            remaining,
        }
    }

    /// Check the weights form a distribution whose largest share goes to the
    /// counter move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let weights = [self.counter, self.predicted, self.remaining];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("counter weights must be non-negative: {self:?}"),
            });
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(Error::InvalidConfiguration {
                message: format!("counter weights sum to {total}, expected 1"),
            });
        }
        if self.counter <= self.predicted || self.counter <= self.remaining {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "counter weight {} must dominate predicted {} and remaining {}",
                    self.counter, self.predicted, self.remaining
                ),
            });
        }
        Ok(())
    }
}

impl Default for CounterWeights {
    fn default() -> Self {
        Self::new(0.6, 0.1, 0.3)
    }
}

/// How a predicted player move is turned into the bot's distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shaping {
    /// Always play the counter of the predicted move
    DeterministicCounter,
    /// Favour the counter but keep some weight on the other moves
    WeightedCounter(CounterWeights),
}

impl Default for Shaping {
    fn default() -> Self {
        Shaping::WeightedCounter(CounterWeights::default())
    }
}

/// Shapes predictions into response distributions and samples bot moves.
///
/// # Examples
///
/// ```
/// use roshambo::{
///     policy::{ArgMaxSampler, ResponsePolicy, Shaping},
///     ports::Prediction,
///     rps::Move,
/// };
///
/// let policy = ResponsePolicy::new(Shaping::default())?;
/// let dist = policy.shape(Prediction::Move(Move::Rock))?;
/// assert_eq!(dist.weight(Move::Paper), 0.6);
///
/// let bot = policy.sample(&dist, &mut ArgMaxSampler)?;
/// assert_eq!(bot, Move::Paper);
/// # Ok::<(), roshambo::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePolicy {
    shaping: Shaping,
}

impl ResponsePolicy {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if weighted-counter weights are
    /// invalid.
    pub fn new(shaping: Shaping) -> Result<Self> {
        if let Shaping::WeightedCounter(weights) = shaping {
            weights.validate()?;
        }
        Ok(Self { shaping })
    }

    pub fn shaping(&self) -> Shaping {
        self.shaping
    }

    /// Distribution over the bot's move for a prediction.
    pub fn shape(&self, prediction: Prediction) -> Result<ResponseDistribution> {
        let predicted = match prediction {
            Prediction::Uniform => return Ok(ResponseDistribution::uniform()),
            Prediction::Move(mv) => mv,
        };

        match self.shaping {
            Shaping::DeterministicCounter => Ok(ResponseDistribution::certain(predicted.counter())),
            Shaping::WeightedCounter(w) => {
                let mut weights = [0.0; MOVE_COUNT];
                weights[predicted.counter().index()] = w.counter;
                weights[predicted.index()] = w.predicted;
                weights[predicted.victim().index()] = w.remaining;
                ResponseDistribution::new(weights)
            }
        }
    }

    /// Draw a move from a distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDistribution`] if the distribution violates its
    /// invariants; nothing is renormalised.
    pub fn sample(
        &self,
        distribution: &ResponseDistribution,
        sampler: &mut dyn MoveSampler,
    ) -> Result<Move> {
        distribution.validate()?;
        Ok(sampler.sample(distribution))
    }

    /// Shape and sample in one step.
    pub fn respond(
        &self,
        prediction: Prediction,
        sampler: &mut dyn MoveSampler,
    ) -> Result<(ResponseDistribution, Move)> {
        let distribution = self.shape(prediction)?;
        let bot = self.sample(&distribution, sampler)?;
        Ok((distribution, bot))
    }
}
