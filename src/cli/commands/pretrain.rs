//! Pretrain command - Warm up a sequence model on synthetic games

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    adapters::MsgPackRepository,
    app::PredictorKind,
    cli::{
        config::{SessionArgs, StrategyArg},
        output::{create_spinner, print_kv, print_section},
    },
    ports::{Predictor, RetrainOutcome},
    sequence::{SequenceModel, synthetic},
    session::{SavedModel, write_piece},
};

#[derive(Parser, Debug)]
#[command(about = "Pretrain a sequence model on a synthetic corpus")]
pub struct PretrainArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// State directory to write the model into
    #[arg(long)]
    pub state_dir: PathBuf,

    /// Number of synthetic training windows
    #[arg(long, short = 'n', default_value_t = 1000)]
    pub samples: usize,

    /// Override the number of training epochs
    #[arg(long)]
    pub epochs: Option<usize>,
}

pub fn execute(args: PretrainArgs) -> Result<()> {
    let mut config = args.session.resolve()?;
    if matches!(args.session.strategy, Some(StrategyArg::Markov)) {
        bail!("pretraining only applies to the sequence strategy");
    }
    config.strategy = PredictorKind::Sequence;
    if let Some(epochs) = args.epochs {
        config.training.epochs = epochs;
    }
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let corpus = synthetic::generate(args.samples, config.window, &mut rng);
    let holdout = synthetic::generate(args.samples / 5 + 1, config.window, &mut rng);

    let mut model = SequenceModel::new(config.window, config.training, config.seed);
    let before = model.network().loss(&holdout);

    let spinner = create_spinner(&format!(
        "Training on {} windows for {} epochs",
        corpus.len(),
        config.training.epochs
    ));
    let outcome = model.pretrain(&corpus)?;
    spinner.finish_and_clear();

    let repo = MsgPackRepository::new(&args.state_dir);
    write_piece(
        &repo,
        &SavedModel::new(model.export_state(), model.retrain_count()),
    )
    .with_context(|| format!("Failed to save model to {}", args.state_dir.display()))?;

    print_section("Pretraining");
    print_kv("Samples", &corpus.len().to_string());
    if let RetrainOutcome::Trained {
        loss: Some(loss), ..
    } = outcome
    {
        print_kv("Final training loss", &format!("{loss:.4}"));
    }
    if let (Some(before), Some(after)) = (before, model.network().loss(&holdout)) {
        print_kv("Held-out loss", &format!("{before:.4} -> {after:.4}"));
    }
    print_kv("Saved to", &args.state_dir.display().to_string());
    Ok(())
}
