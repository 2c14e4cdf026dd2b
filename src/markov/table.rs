//! Transition count table

use serde::{Deserialize, Serialize};

use crate::{
    rps::{Move, moves::MOVE_COUNT},
    utils::normalize_weights,
};

/// Observed counts of `from -> to` player move transitions.
///
/// Indexed by [`Move::index`]; every cell starts at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    counts: [[u64; MOVE_COUNT]; MOVE_COUNT],
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every consecutive pair of a move sequence.
    pub fn from_moves<I>(moves: I) -> Self
    where
        I: IntoIterator<Item = Move>,
    {
        let mut table = Self::new();
        let mut previous: Option<Move> = None;
        for mv in moves {
            if let Some(from) = previous {
                table.increment(from, mv);
            }
            previous = Some(mv);
        }
        table
    }

    pub fn increment(&mut self, from: Move, to: Move) {
        self.counts[from.index()][to.index()] += 1;
    }

    pub fn count(&self, from: Move, to: Move) -> u64 {
        self.counts[from.index()][to.index()]
    }

    pub fn row(&self, from: Move) -> [u64; MOVE_COUNT] {
        self.counts[from.index()]
    }

    pub fn row_total(&self, from: Move) -> u64 {
        self.row(from).iter().sum()
    }

    /// Total number of transitions counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Empirical `P(next | from)`; uniform when the row has no observations.
    pub fn row_probabilities(&self, from: Move) -> [f64; MOVE_COUNT] {
        normalize_weights(&self.row(from).map(|count| count as f64))
    }

    /// Most probable successor of `from`, ties resolved rock, paper, scissors.
    pub fn most_likely_next(&self, from: Move) -> Move {
        Move::from_scores(&self.row_probabilities(from))
    }
}
