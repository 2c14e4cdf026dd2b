//! Play command - Interactive game against the bot on stdin/stdout

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    Error,
    app::App,
    cli::{
        config::SessionArgs,
        output::{format_round, format_stats},
    },
};

#[derive(Parser, Debug)]
#[command(about = "Play against the bot, one move per line")]
pub struct PlayArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Directory to restore state from on start and save to on exit
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(args, stdin.lock(), stdout.lock())
}

/// Drive the game loop from any line source.
///
/// Commands: a move (`rock`, `paper`, `scissors` or `r`, `p`, `s`), `stats`,
/// `reset`, `quit`. End of input also quits.
pub fn run<R: BufRead, W: Write>(args: PlayArgs, input: R, mut out: W) -> Result<()> {
    let config = args.session.resolve()?;
    let app = match &args.state_dir {
        Some(dir) => App::with_state_dir(dir),
        None => App::new(),
    };
    let mut session = app
        .restore_session(config)
        .context("Failed to start session")?;

    writeln!(
        out,
        "Playing against the {} predictor ({} rounds so far). Type a move, 'stats' or 'quit'.",
        session.predictor().name(),
        session.history().len()
    )?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let command = line.trim();
        match command.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "stats" => writeln!(out, "{}", format_stats(&session.stats()))?,
            "reset" => {
                session.reset_stats();
                writeln!(out, "Statistics reset.")?;
            }
            _ => match session.play_round_str(command) {
                Ok(result) => writeln!(out, "{}", format_round(&result))?,
                Err(err @ Error::InvalidMove { .. }) => writeln!(out, "{err}")?,
                Err(err) => return Err(err).context("Round failed"),
            },
        }
    }

    if let Some(dir) = &args.state_dir {
        session
            .save()
            .with_context(|| format!("Failed to save state to {}", dir.display()))?;
        writeln!(out, "State saved to {}", dir.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn play(input: &str, state_dir: Option<PathBuf>) -> String {
        let args = PlayArgs {
            session: SessionArgs {
                seed: Some(1),
                ..SessionArgs::default()
            },
            state_dir,
        };
        let mut out = Vec::new();
        run(args, Cursor::new(input.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn invalid_moves_are_reported_and_skipped() {
        let out = play("rock\nlizard\npaper\nstats\nquit\nrock\n", None);
        assert!(out.contains("invalid move 'lizard'"));
        assert!(out.contains("round 2:"));
        assert!(!out.contains("round 3:"));
        assert!(out.contains("Games played:"));
    }

    #[test]
    fn state_dir_carries_history_between_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        play("r\np\ns\n", Some(dir.path().to_path_buf()));
        let out = play("rock\n", Some(dir.path().to_path_buf()));
        assert!(out.contains("(3 rounds so far)"));
        assert!(out.contains("round 4:"));
    }
}
