//! Reset command - Zero the statistics in a state directory

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    session::{SavedStats, SessionStats, write_piece},
};

#[derive(Parser, Debug)]
#[command(about = "Reset saved statistics (history and model are kept)")]
pub struct ResetArgs {
    /// State directory written by `play --state-dir`
    #[arg(long)]
    pub state_dir: PathBuf,
}

pub fn execute(args: ResetArgs) -> Result<()> {
    let repo = MsgPackRepository::new(&args.state_dir);
    write_piece(&repo, &SavedStats::new(&SessionStats::new()))
        .with_context(|| format!("Failed to reset stats in {}", args.state_dir.display()))?;
    println!("Statistics reset in {}", args.state_dir.display());
    Ok(())
}
