//! Drawing a concrete move from a response distribution

use rand::{SeedableRng, rngs::StdRng};

use crate::{policy::distribution::ResponseDistribution, rps::Move, utils::weighted_sample};

/// Source of the bot's move given a validated distribution.
///
/// Sessions own their sampler so a seeded one makes a whole game
/// reproducible.
pub trait MoveSampler: Send {
    fn sample(&mut self, distribution: &ResponseDistribution) -> Move;

    fn name(&self) -> &str;
}

/// Draws moves proportionally to their weight.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MoveSampler for RandomSampler {
    fn sample(&mut self, distribution: &ResponseDistribution) -> Move {
        weighted_sample(&mut self.rng, &distribution.pairs()).unwrap_or(Move::Rock)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Always plays the highest-weight move; ties go to rock, then paper.
///
/// Makes tests and replays fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgMaxSampler;

impl MoveSampler for ArgMaxSampler {
    fn sample(&mut self, distribution: &ResponseDistribution) -> Move {
        distribution.most_likely()
    }

    fn name(&self) -> &str {
        "argmax"
    }
}
