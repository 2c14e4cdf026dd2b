//! Export command - Write the round history of a state directory as CSV

use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    session::{SavedHistory, load_piece},
};

#[derive(Parser, Debug)]
#[command(about = "Export the round history as CSV")]
pub struct ExportArgs {
    /// State directory written by `play --state-dir`
    #[arg(long)]
    pub state_dir: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let repo = MsgPackRepository::new(&args.state_dir);
    let mut failures = Vec::new();
    let history = load_piece::<SavedHistory>(&repo, &mut failures)
        .map(SavedHistory::into_log)
        .unwrap_or_default();

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            history.write_csv(BufWriter::new(file))?;
            eprintln!("Exported {} rounds to {}", history.len(), path.display());
        }
        None => history.write_csv(io::stdout().lock())?,
    }
    Ok(())
}
