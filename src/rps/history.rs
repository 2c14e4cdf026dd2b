//! Append-only round history

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::{moves::Move, outcome::Outcome};
use crate::Result;

/// A single recorded round.
///
/// The outcome is always derived from the move pair, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Zero-based position of the round in the history
    pub index: u64,
    pub player: Move,
    pub bot: Move,
}

impl Round {
    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.player, self.bot)
    }
}

/// Ordered log of every round played in a session.
///
/// Rounds are only ever appended; nothing is reordered or truncated.
/// Readers take suffix views instead of keeping separate copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    rounds: Vec<Round>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted rounds.
    ///
    /// Indices are reassigned so the log stays densely numbered even if the
    /// stored rounds were edited by hand.
    pub fn from_rounds<I>(rounds: I) -> Self
    where
        I: IntoIterator<Item = Round>,
    {
        let mut log = Self::new();
        for round in rounds {
            log.record(round.player, round.bot);
        }
        log
    }

    /// Append a round and return it.
    pub fn record(&mut self, player: Move, bot: Move) -> Round {
        let round = Round {
            index: self.rounds.len() as u64,
            player,
            bot,
        };
        self.rounds.push(round);
        round
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// The last `n` rounds (fewer if the log is shorter).
    pub fn recent(&self, n: usize) -> &[Round] {
        let start = self.rounds.len().saturating_sub(n);
        &self.rounds[start..]
    }

    /// Player moves in play order.
    pub fn player_moves(&self) -> impl DoubleEndedIterator<Item = Move> + ExactSizeIterator + '_ {
        self.rounds.iter().map(|round| round.player)
    }

    pub fn last_player_move(&self) -> Option<Move> {
        self.rounds.last().map(|round| round.player)
    }

    /// The last `size` player moves, oldest first, or `None` if fewer exist.
    pub fn window(&self, size: usize) -> Option<Vec<Move>> {
        if size == 0 || self.rounds.len() < size {
            return None;
        }
        Some(self.recent(size).iter().map(|round| round.player).collect())
    }

    /// The last `n` player moves, oldest first.
    pub fn recent_player_moves(&self, n: usize) -> Vec<Move> {
        self.recent(n).iter().map(|round| round.player).collect()
    }

    /// Count of rounds ending in the given outcome.
    pub fn count_outcome(&self, outcome: Outcome) -> usize {
        self.rounds
            .iter()
            .filter(|round| round.outcome() == outcome)
            .count()
    }

    /// Write the log as CSV with a `round,player,bot,outcome` header.
    ///
    /// Round numbers are one-based.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        #[derive(Serialize)]
        struct Row {
            round: u64,
            player: Move,
            bot: Move,
            outcome: Outcome,
        }

        let mut csv = csv::Writer::from_writer(writer);
        if self.rounds.is_empty() {
            // serialize() only emits the header alongside the first row
            csv.write_record(["round", "player", "bot", "outcome"])?;
        }
        for round in &self.rounds {
            csv.serialize(Row {
                round: round.index + 1,
                player: round.player,
                bot: round.bot,
                outcome: round.outcome(),
            })?;
        }
        csv.flush()?;
        Ok(())
    }
}
