//! Subcommands of the `roshambo` binary

pub mod export;
pub mod play;
pub mod pretrain;
pub mod reset;
pub mod simulate;
pub mod stats;
