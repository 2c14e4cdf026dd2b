//! Scripted opponents for exercising the bot

use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::rps::{HistoryLog, Move};

/// A player whose next move is a function of the rounds so far.
pub trait ScriptedPlayer: Send {
    fn next_move(&mut self, history: &HistoryLog) -> Move;

    fn name(&self) -> String;
}

/// Always throws the same move.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPlayer(pub Move);

impl ScriptedPlayer for ConstantPlayer {
    fn next_move(&mut self, _history: &HistoryLog) -> Move {
        self.0
    }

    fn name(&self) -> String {
        format!("constant {}", self.0)
    }
}

/// Repeats a fixed sequence of moves.
#[derive(Debug, Clone)]
pub struct CyclePlayer {
    cycle: Vec<Move>,
    label: &'static str,
}

impl CyclePlayer {
    /// Falls back to rock, paper, scissors if `cycle` is empty.
    pub fn new(cycle: Vec<Move>) -> Self {
        let cycle = if cycle.is_empty() {
            Move::ALL.to_vec()
        } else {
            cycle
        };
        Self {
            cycle,
            label: "cycle",
        }
    }

    /// Rock, paper, scissors, rock, ...
    pub fn rotation() -> Self {
        Self::new(Move::ALL.to_vec())
    }

    /// Rock, rock, paper, paper, scissors, scissors, ...
    pub fn pairs() -> Self {
        Self {
            cycle: Move::ALL.iter().flat_map(|&mv| [mv, mv]).collect(),
            label: "pairs",
        }
    }
}

impl ScriptedPlayer for CyclePlayer {
    fn next_move(&mut self, history: &HistoryLog) -> Move {
        self.cycle[history.len() % self.cycle.len()]
    }

    fn name(&self) -> String {
        let moves: Vec<&str> = self.cycle.iter().map(|mv| mv.as_str()).collect();
        format!("{} [{}]", self.label, moves.join(", "))
    }
}

/// Uniformly random moves; nothing to learn.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl ScriptedPlayer for RandomPlayer {
    fn next_move(&mut self, _history: &HistoryLog) -> Move {
        Move::from_index(self.rng.random_range(0..Move::ALL.len()))
    }

    fn name(&self) -> String {
        "random".to_string()
    }
}

/// Throws whatever would have beaten the bot's previous move.
#[derive(Debug, Clone, Copy)]
pub struct BeatLastPlayer {
    opening: Move,
}

impl BeatLastPlayer {
    pub fn new(opening: Move) -> Self {
        Self { opening }
    }
}

impl Default for BeatLastPlayer {
    fn default() -> Self {
        Self::new(Move::Rock)
    }
}

impl ScriptedPlayer for BeatLastPlayer {
    fn next_move(&mut self, history: &HistoryLog) -> Move {
        history
            .last()
            .map_or(self.opening, |round| round.bot.counter())
    }

    fn name(&self) -> String {
        "beat-last".to_string()
    }
}

/// Selector for the built-in scripted players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Constant(Move),
    Cycle,
    Pairs,
    Random,
    BeatLast,
}

impl PlayerKind {
    pub fn build(self, seed: Option<u64>) -> Box<dyn ScriptedPlayer> {
        match self {
            PlayerKind::Constant(mv) => Box::new(ConstantPlayer(mv)),
            PlayerKind::Cycle => Box::new(CyclePlayer::rotation()),
            PlayerKind::Pairs => Box::new(CyclePlayer::pairs()),
            PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
            PlayerKind::BeatLast => Box::new(BeatLastPlayer::default()),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Constant(mv) => write!(f, "constant-{mv}"),
            PlayerKind::Cycle => f.write_str("cycle"),
            PlayerKind::Pairs => f.write_str("pairs"),
            PlayerKind::Random => f.write_str("random"),
            PlayerKind::BeatLast => f.write_str("beat-last"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(player: &mut dyn ScriptedPlayer, bot: Move, rounds: usize) -> Vec<Move> {
        let mut history = HistoryLog::new();
        (0..rounds)
            .map(|_| {
                let mv = player.next_move(&history);
                history.record(mv, bot);
                mv
            })
            .collect()
    }

    #[test]
    fn pairs_doubles_each_move() {
        let moves = drive(&mut CyclePlayer::pairs(), Move::Rock, 7);
        assert_eq!(
            moves,
            vec![
                Move::Rock,
                Move::Rock,
                Move::Paper,
                Move::Paper,
                Move::Scissors,
                Move::Scissors,
                Move::Rock
            ]
        );
    }

    #[test]
    fn beat_last_counters_previous_bot_move() {
        let moves = drive(&mut BeatLastPlayer::default(), Move::Scissors, 3);
        assert_eq!(moves, vec![Move::Rock, Move::Rock, Move::Rock]);
    }

    #[test]
    fn empty_cycle_falls_back_to_rotation() {
        let moves = drive(&mut CyclePlayer::new(Vec::new()), Move::Rock, 4);
        assert_eq!(
            moves,
            vec![Move::Rock, Move::Paper, Move::Scissors, Move::Rock]
        );
    }

    #[test]
    fn seeded_random_player_is_reproducible() {
        let a = drive(&mut RandomPlayer::new(Some(3)), Move::Rock, 20);
        let b = drive(&mut RandomPlayer::new(Some(3)), Move::Rock, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn kinds_build_named_players() {
        assert_eq!(PlayerKind::Random.build(Some(1)).name(), "random");
        assert_eq!(
            PlayerKind::Constant(Move::Paper).build(None).name(),
            "constant paper"
        );
        assert_eq!(PlayerKind::BeatLast.to_string(), "beat-last");
    }
}
