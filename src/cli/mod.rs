//! CLI infrastructure for the roshambo binary
//!
//! Each subcommand has an `Args` struct (clap derive) and an `execute`
//! function returning `anyhow::Result`.

pub mod commands;
pub mod config;
pub mod output;
