//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::{
    app::{PredictorKind, SessionConfig},
    policy::Shaping,
};

/// Prediction strategy selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Markov,
    Sequence,
}

impl From<StrategyArg> for PredictorKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Markov => PredictorKind::Markov,
            StrategyArg::Sequence => PredictorKind::Sequence,
        }
    }
}

/// Response shaping selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapingArg {
    /// Always play the counter of the predicted move
    Counter,
    /// Weighted counter using the configured (or default) weights
    Weighted,
}

/// Session options shared by every command that builds a session
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// JSON session configuration; flags below override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Prediction strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Response shaping
    #[arg(long, value_enum)]
    pub shaping: Option<ShapingArg>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Retrain the predictor every N rounds
    #[arg(long)]
    pub retrain_interval: Option<u64>,
}

impl SessionArgs {
    /// Merge the config file (if any) with flag overrides and validate.
    pub fn resolve(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SessionConfig::default(),
        };

        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        match self.shaping {
            Some(ShapingArg::Counter) => config.shaping = Shaping::DeterministicCounter,
            Some(ShapingArg::Weighted) => {
                if !matches!(config.shaping, Shaping::WeightedCounter(_)) {
                    config.shaping = Shaping::default();
                }
            }
            None => {}
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(interval) = self.retrain_interval {
            config.retrain_interval = interval;
        }

        config.validate().context("Invalid session configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CounterWeights;

    #[test]
    fn flags_override_defaults() {
        let args = SessionArgs {
            strategy: Some(StrategyArg::Sequence),
            shaping: Some(ShapingArg::Counter),
            seed: Some(9),
            retrain_interval: Some(4),
            ..SessionArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.strategy, PredictorKind::Sequence);
        assert_eq!(config.shaping, Shaping::DeterministicCounter);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.retrain_interval, 4);
    }

    #[test]
    fn weighted_flag_keeps_file_weights() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let custom = SessionConfig::default()
            .with_counter_weights(CounterWeights::new(0.7, 0.1, 0.2));
        std::fs::write(&path, serde_json::to_string(&custom).unwrap()).unwrap();

        let args = SessionArgs {
            config: Some(path),
            shaping: Some(ShapingArg::Weighted),
            ..SessionArgs::default()
        };
        assert_eq!(args.resolve().unwrap().shaping, custom.shaping);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let args = SessionArgs {
            retrain_interval: Some(0),
            ..SessionArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
