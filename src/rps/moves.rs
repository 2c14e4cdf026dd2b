//! Moves and the one-hot move codec

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::Error, utils::argmax};

/// Number of distinct moves.
pub const MOVE_COUNT: usize = 3;

/// One of the three symbolic choices.
///
/// The declaration order (rock, paper, scissors) is the fixed priority order
/// used to break ties wherever a maximum is taken over moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// All moves in priority order.
    pub const ALL: [Move; MOVE_COUNT] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Slot of this move in one-hot vectors and count tables.
    pub const fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissors => 2,
        }
    }

    /// Inverse of [`Move::index`]. Out-of-range indices wrap.
    pub const fn from_index(index: usize) -> Self {
        match index % MOVE_COUNT {
            0 => Move::Rock,
            1 => Move::Paper,
            _ => Move::Scissors,
        }
    }

    /// The unique move that beats `self`.
    pub const fn counter(self) -> Self {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    /// The unique move that `self` beats.
    pub const fn victim(self) -> Self {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// Whether `self` beats `other`.
    pub fn beats(self, other: Move) -> bool {
        self.victim() == other
    }

    /// Encode as a fixed three-slot one-hot vector.
    pub fn one_hot(self) -> [f64; MOVE_COUNT] {
        let mut encoded = [0.0; MOVE_COUNT];
        encoded[self.index()] = 1.0;
        encoded
    }

    /// Decode a score vector by arg-max, ties resolved rock, paper, scissors.
    ///
    /// ```
    /// use roshambo::rps::Move;
    ///
    /// assert_eq!(Move::from_scores(&Move::Scissors.one_hot()), Move::Scissors);
    /// assert_eq!(Move::from_scores(&[0.4, 0.4, 0.2]), Move::Rock);
    /// ```
    pub fn from_scores(scores: &[f64; MOVE_COUNT]) -> Self {
        Move::from_index(argmax(scores))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            _ => Err(Error::InvalidMove {
                input: s.to_string(),
            }),
        }
    }
}
