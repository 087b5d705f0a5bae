use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bpnn::TrainingConfig;

/// Trains a back-propagation network as described by a parameter file.
#[derive(Parser)]
#[command(name = "bpnn", version, about, long_about = None)]
struct Cli {
    /// Parameter file (line-pair text, or JSON when it ends in .json)
    #[arg(default_value = "Input.txt")]
    params: PathBuf,

    /// Seed for weight initialisation; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// File receiving the predictions of the latest test run
    #[arg(short, long, default_value = "Results.txt")]
    results: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("bpnn: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> bpnn::Result<()> {
    let config = TrainingConfig::load(&cli.params)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let folds = bpnn::train::run(&config, &cli.results, &mut rng)?;
    for fold in &folds {
        info!(
            "fold {}: test error {:?}%, cross-validation error {:?}%",
            fold.outcome.fold, fold.test_errors, fold.crossvalidation_errors
        );
    }
    Ok(())
}
