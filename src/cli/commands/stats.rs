//! Stats command - Read-only statistics query against a state directory

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    app::SessionConfig,
    cli::output::{print_section, print_stats},
    session::{SavedHistory, SavedModel, SavedStats, StatsSnapshot, load_piece},
};

#[derive(Parser, Debug)]
#[command(about = "Show statistics saved in a state directory")]
pub struct StatsArgs {
    /// State directory written by `play --state-dir`
    #[arg(long)]
    pub state_dir: PathBuf,

    /// Number of recent player moves to show
    #[arg(long, default_value_t = SessionConfig::default().stats_window)]
    pub last: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Build the snapshot without constructing a session, so any predictor kind
/// can be inspected.
///
/// A damaged piece is logged and read as its default.
pub fn load_snapshot(state_dir: &Path, last: usize) -> StatsSnapshot {
    let repo = MsgPackRepository::new(state_dir);
    let mut failures = Vec::new();
    let history = load_piece::<SavedHistory>(&repo, &mut failures)
        .map(SavedHistory::into_log)
        .unwrap_or_default();
    let stats = load_piece::<SavedStats>(&repo, &mut failures)
        .map(|saved| saved.stats)
        .unwrap_or_default();
    let retrain_count =
        load_piece::<SavedModel>(&repo, &mut failures).map_or(0, |saved| saved.retrain_count);

    StatsSnapshot::new(&stats, history.recent_player_moves(last), retrain_count)
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.state_dir, args.last);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_section(&format!("Statistics: {}", args.state_dir.display()));
        print_stats(&snapshot);
    }
    Ok(())
}
