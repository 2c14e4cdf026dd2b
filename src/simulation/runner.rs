//! Running a session against a scripted player

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    rps::Outcome,
    session::{GameSession, RoundResult, StatsSnapshot},
    simulation::players::ScriptedPlayer,
};

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Scripted player description
    pub player: String,
    /// Active predictor
    pub predictor: String,
    /// Rounds played in this run
    pub rounds: u64,
    /// Bot wins over the first half of the run
    pub early_bot_win_share: f64,
    /// Bot wins over the second half of the run
    pub late_bot_win_share: f64,
    /// Rounds in which the predictor was refit
    pub retrains: u64,
    /// Session statistics after the last round
    pub final_stats: StatsSnapshot,
}

/// Plays a fixed number of rounds between a session and a scripted player.
///
/// # Examples
///
/// ```
/// use roshambo::{
///     app::SessionConfig,
///     policy::ArgMaxSampler,
///     rps::Move,
///     session::GameSession,
///     simulation::{ConstantPlayer, Simulation},
/// };
///
/// let mut session = GameSession::new(SessionConfig::default())?.with_sampler(ArgMaxSampler);
/// let summary = Simulation::new(40).run(&mut session, &mut ConstantPlayer(Move::Rock))?;
/// assert_eq!(summary.rounds, 40);
/// assert!(summary.late_bot_win_share > summary.early_bot_win_share);
/// # Ok::<(), roshambo::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Simulation {
    rounds: u64,
}

impl Simulation {
    pub fn new(rounds: u64) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn run(
        &self,
        session: &mut GameSession,
        player: &mut dyn ScriptedPlayer,
    ) -> Result<SimulationSummary> {
        self.run_with(session, player, |_| {})
    }

    /// Like [`Simulation::run`], calling `on_round` after every round.
    pub fn run_with<F>(
        &self,
        session: &mut GameSession,
        player: &mut dyn ScriptedPlayer,
        mut on_round: F,
    ) -> Result<SimulationSummary>
    where
        F: FnMut(&RoundResult),
    {
        let half = self.rounds / 2;
        let mut early_bot_wins = 0u64;
        let mut late_bot_wins = 0u64;
        let mut retrains = 0u64;

        for played in 0..self.rounds {
            let mv = player.next_move(session.history());
            let result = session.play_round(mv)?;
            if result.outcome == Outcome::BotWin {
                if played < half {
                    early_bot_wins += 1;
                } else {
                    late_bot_wins += 1;
                }
            }
            if result.retrained {
                retrains += 1;
            }
            on_round(&result);
        }

        Ok(SimulationSummary {
            player: player.name(),
            predictor: session.predictor().name().to_string(),
            rounds: self.rounds,
            early_bot_win_share: share(early_bot_wins, half),
            late_bot_win_share: share(late_bot_wins, self.rounds - half),
            retrains,
            final_stats: session.stats(),
        })
    }
}

fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{PredictorKind, SessionConfig},
        policy::{ArgMaxSampler, Shaping},
        rps::Move,
        simulation::players::{CyclePlayer, RandomPlayer},
    };

    #[test]
    fn markov_bot_exploits_a_rotating_player() {
        let config = SessionConfig::default().with_shaping(Shaping::DeterministicCounter);
        let mut session = GameSession::new(config).unwrap().with_sampler(ArgMaxSampler);
        let summary = Simulation::new(60)
            .run(&mut session, &mut CyclePlayer::rotation())
            .unwrap();

        assert_eq!(summary.retrains, 6);
        assert_eq!(summary.late_bot_win_share, 1.0);
        assert_eq!(summary.final_stats.games_played, 60);
    }

    #[test]
    fn callback_sees_every_round() {
        let mut session = GameSession::new(SessionConfig::default().with_seed(5)).unwrap();
        let mut seen = Vec::new();
        Simulation::new(12)
            .run_with(
                &mut session,
                &mut RandomPlayer::new(Some(5)),
                |result| seen.push(result.round),
            )
            .unwrap();
        assert_eq!(seen, (1..=12).collect::<Vec<u64>>());
    }

    #[test]
    fn sequence_bot_runs_end_to_end() {
        let config = SessionConfig::new(PredictorKind::Sequence).with_seed(11);
        let mut session = GameSession::new(config).unwrap();
        let summary = Simulation::new(30)
            .run(&mut session, &mut CyclePlayer::new(vec![Move::Rock, Move::Paper]))
            .unwrap();
        assert_eq!(summary.predictor, "sequence");
        assert_eq!(summary.retrains, 3);
    }
}
