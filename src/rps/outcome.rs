//! Round outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::moves::Move;

/// Result of comparing the player's move against the bot's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWin,
    BotWin,
    Tie,
}

impl Outcome {
    /// Score a round from the player's and the bot's move.
    pub fn of(player: Move, bot: Move) -> Self {
        if player == bot {
            Outcome::Tie
        } else if player.beats(bot) {
            Outcome::PlayerWin
        } else {
            Outcome::BotWin
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::PlayerWin => "player_win",
            Outcome::BotWin => "bot_win",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
