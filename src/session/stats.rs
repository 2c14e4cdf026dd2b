//! Running session statistics

use serde::{Deserialize, Serialize};

use crate::rps::{Move, Outcome, Round};

/// Per-move tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCounts {
    pub rock: u64,
    pub paper: u64,
    pub scissors: u64,
}

impl MoveCounts {
    pub fn get(&self, mv: Move) -> u64 {
        match mv {
            Move::Rock => self.rock,
            Move::Paper => self.paper,
            Move::Scissors => self.scissors,
        }
    }

    fn bump(&mut self, mv: Move) {
        let slot = match mv {
            Move::Rock => &mut self.rock,
            Move::Paper => &mut self.paper,
            Move::Scissors => &mut self.scissors,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        self.rock + self.paper + self.scissors
    }
}

/// Lifecycle of a session: idle until the first round, active forever after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Active,
}

/// Aggregate counters, from the player's point of view.
///
/// Updated exactly once per completed round. Counts only grow; the current
/// streak drops back to zero on any round the player does not win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    games_played: u64,
    wins: u64,
    losses: u64,
    ties: u64,
    current_streak: u64,
    max_streak: u64,
    player_moves: MoveCounts,
    bot_moves: MoveCounts,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completed round into the counters.
    pub fn record(&mut self, round: &Round) {
        self.games_played += 1;
        match round.outcome() {
            Outcome::PlayerWin => {
                self.wins += 1;
                self.current_streak += 1;
                self.max_streak = self.max_streak.max(self.current_streak);
            }
            Outcome::BotWin => {
                self.losses += 1;
                self.current_streak = 0;
            }
            Outcome::Tie => {
                self.ties += 1;
                self.current_streak = 0;
            }
        }
        self.player_moves.bump(round.player);
        self.bot_moves.bump(round.bot);
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }

    pub fn losses(&self) -> u64 {
        self.losses
    }

    pub fn ties(&self) -> u64 {
        self.ties
    }

    pub fn current_streak(&self) -> u64 {
        self.current_streak
    }

    pub fn max_streak(&self) -> u64 {
        self.max_streak
    }

    pub fn player_moves(&self) -> MoveCounts {
        self.player_moves
    }

    pub fn bot_moves(&self) -> MoveCounts {
        self.bot_moves
    }

    pub fn state(&self) -> SessionState {
        if self.games_played == 0 {
            SessionState::Idle
        } else {
            SessionState::Active
        }
    }

    /// Player wins as a percentage of decisive games, one decimal.
    pub fn player_win_rate(&self) -> f64 {
        decisive_rate(self.wins, self.wins + self.losses)
    }

    /// Bot wins as a percentage of decisive games, one decimal.
    pub fn bot_win_rate(&self) -> f64 {
        decisive_rate(self.losses, self.wins + self.losses)
    }

    /// Bot wins over all games played, ties included.
    pub fn bot_win_share(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.losses as f64 / self.games_played as f64
    }
}

fn decisive_rate(count: u64, decisive: u64) -> f64 {
    if decisive == 0 {
        return 0.0;
    }
    (count as f64 / decisive as f64 * 1000.0).round() / 10.0
}

/// Read-only view returned by the statistics query and with every round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub state: SessionState,
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
    pub current_streak: u64,
    pub max_streak: u64,
    pub player_moves: MoveCounts,
    pub bot_moves: MoveCounts,
    pub player_win_rate: f64,
    pub bot_win_rate: f64,
    pub bot_win_share: f64,
    /// Most recent player moves, oldest first
    pub last_moves: Vec<Move>,
    /// Completed retrains of the active predictor
    pub retrain_count: u64,
}

impl StatsSnapshot {
    pub fn new(stats: &SessionStats, last_moves: Vec<Move>, retrain_count: u64) -> Self {
        Self {
            state: stats.state(),
            games_played: stats.games_played,
            wins: stats.wins,
            losses: stats.losses,
            ties: stats.ties,
            current_streak: stats.current_streak,
            max_streak: stats.max_streak,
            player_moves: stats.player_moves,
            bot_moves: stats.bot_moves,
            player_win_rate: stats.player_win_rate(),
            bot_win_rate: stats.bot_win_rate(),
            bot_win_share: stats.bot_win_share(),
            last_moves,
            retrain_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(player: Move, bot: Move) -> Round {
        Round {
            index: 0,
            player,
            bot,
        }
    }

    #[test]
    fn fresh_stats_are_idle() {
        let stats = SessionStats::new();
        assert_eq!(stats.state(), SessionState::Idle);
        assert_eq!(stats.player_win_rate(), 0.0);
        assert_eq!(stats.bot_win_share(), 0.0);
    }

    #[test]
    fn streak_resets_on_loss_and_tie() {
        let mut stats = SessionStats::new();
        stats.record(&round(Move::Rock, Move::Scissors)); // win
        stats.record(&round(Move::Paper, Move::Rock)); // win
        assert_eq!(stats.current_streak(), 2);

        stats.record(&round(Move::Rock, Move::Rock)); // tie
        assert_eq!(stats.current_streak(), 0);
        assert_eq!(stats.max_streak(), 2);

        stats.record(&round(Move::Scissors, Move::Paper)); // win
        stats.record(&round(Move::Scissors, Move::Rock)); // loss
        assert_eq!(stats.current_streak(), 0);
        assert_eq!(stats.max_streak(), 2);
        assert_eq!(stats.state(), SessionState::Active);
    }

    #[test]
    fn counts_every_round_once() {
        let mut stats = SessionStats::new();
        stats.record(&round(Move::Rock, Move::Paper));
        stats.record(&round(Move::Rock, Move::Scissors));
        stats.record(&round(Move::Paper, Move::Paper));

        assert_eq!(stats.games_played(), 3);
        assert_eq!(
            (stats.wins(), stats.losses(), stats.ties()),
            (1, 1, 1)
        );
        assert_eq!(stats.player_moves().get(Move::Rock), 2);
        assert_eq!(stats.bot_moves().get(Move::Paper), 2);
        assert_eq!(stats.player_moves().total(), 3);
    }

    #[test]
    fn win_rates_exclude_ties() {
        let mut stats = SessionStats::new();
        stats.record(&round(Move::Rock, Move::Scissors)); // win
        stats.record(&round(Move::Rock, Move::Paper)); // loss
        stats.record(&round(Move::Rock, Move::Paper)); // loss
        stats.record(&round(Move::Rock, Move::Rock)); // tie

        assert_eq!(stats.player_win_rate(), 33.3);
        assert_eq!(stats.bot_win_rate(), 66.7);
        assert_eq!(stats.bot_win_share(), 0.5);
    }

    #[test]
    fn snapshot_copies_counters() {
        let mut stats = SessionStats::new();
        stats.record(&round(Move::Paper, Move::Rock));
        let snapshot = StatsSnapshot::new(&stats, vec![Move::Paper], 2);
        assert_eq!(snapshot.games_played, 1);
        assert_eq!(snapshot.wins, 1);
        assert_eq!(snapshot.player_win_rate, 100.0);
        assert_eq!(snapshot.last_moves, vec![Move::Paper]);
        assert_eq!(snapshot.retrain_count, 2);
        assert_eq!(snapshot.state, SessionState::Active);
    }
}
