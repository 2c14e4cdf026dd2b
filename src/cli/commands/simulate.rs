//! Simulate command - Run the bot against a scripted player

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    app::App,
    cli::{
        config::SessionArgs,
        output::{create_round_progress, print_section, print_summary},
    },
    rps::Move,
    simulation::{PlayerKind, Simulation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    /// Always the same move (see --constant-move)
    Constant,
    /// Rock, paper, scissors, repeated
    Cycle,
    /// Each move twice in a row
    Pairs,
    /// Uniformly random
    Random,
    /// Whatever beats the bot's previous move
    BeatLast,
}

#[derive(Parser, Debug)]
#[command(about = "Simulate games against a scripted player")]
pub struct SimulateArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Scripted opponent
    #[arg(long, short = 'p', value_enum, default_value = "cycle")]
    pub player: PlayerArg,

    /// Move thrown by the constant player
    #[arg(long, default_value = "rock")]
    pub constant_move: String,

    /// Number of rounds
    #[arg(long, short = 'r', default_value_t = 100)]
    pub rounds: u64,

    /// Write the summary as JSON
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl SimulateArgs {
    fn player_kind(&self) -> Result<PlayerKind> {
        Ok(match self.player {
            PlayerArg::Constant => {
                let mv: Move = self
                    .constant_move
                    .parse()
                    .context("Invalid --constant-move")?;
                PlayerKind::Constant(mv)
            }
            PlayerArg::Cycle => PlayerKind::Cycle,
            PlayerArg::Pairs => PlayerKind::Pairs,
            PlayerArg::Random => PlayerKind::Random,
            PlayerArg::BeatLast => PlayerKind::BeatLast,
        })
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = args.session.resolve()?;
    let kind = args.player_kind()?;
    // Offset so a seeded random player never mirrors the bot's sampler.
    let mut player = kind.build(config.seed.map(|s| s.wrapping_add(1)));
    let mut session = App::new().create_session(config)?;

    let progress = (!args.no_progress).then(|| create_round_progress(args.rounds));
    let summary = Simulation::new(args.rounds).run_with(&mut session, player.as_mut(), |result| {
        if let Some(pb) = &progress {
            pb.set_position(result.round);
            pb.set_message(format!(
                "bot {} / player {} / ties {}",
                result.stats.losses, result.stats.wins, result.stats.ties
            ));
        }
    })?;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    print_section(&format!("Simulation: {} vs {}", summary.predictor, kind));
    print_summary(&summary);

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)
            .context("Failed to write simulation summary")?;
        println!("\nSummary written to {}", path.display());
    }
    Ok(())
}
