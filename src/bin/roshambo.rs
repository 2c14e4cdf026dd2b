//! roshambo CLI - Play rock-paper-scissors against an adaptive bot
//!
//! Subcommands:
//! - Play interactively, optionally persisting state between runs
//! - Simulate games against scripted players
//! - Inspect, reset and export saved state
//! - Pretrain the sequence model on synthetic games

use anyhow::Result;
use clap::{Parser, Subcommand};
use roshambo::cli::commands::{export, play, pretrain, reset, simulate, stats};

#[derive(Parser)]
#[command(name = "roshambo")]
#[command(version, about = "Rock-paper-scissors against a bot that learns your habits", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the bot on stdin
    Play(play::PlayArgs),

    /// Run the bot against a scripted player
    Simulate(simulate::SimulateArgs),

    /// Show saved statistics
    Stats(stats::StatsArgs),

    /// Pretrain the sequence model on synthetic games
    Pretrain(pretrain::PretrainArgs),

    /// Reset saved statistics
    Reset(reset::ResetArgs),

    /// Export the saved round history as CSV
    Export(export::ExportArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play(args) => play::execute(args),
        Commands::Simulate(args) => simulate::execute(args),
        Commands::Stats(args) => stats::execute(args),
        Commands::Pretrain(args) => pretrain::execute(args),
        Commands::Reset(args) => reset::execute(args),
        Commands::Export(args) => export::execute(args),
    }
}
