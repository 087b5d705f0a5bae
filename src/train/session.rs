use std::path::Path;

use log::info;
use rand::Rng;

use crate::config::params::TrainingConfig;
use crate::data::patterns::Dataset;
use crate::error::Result;
use crate::network::network::Network;
use crate::report::{write_results, Report};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{TrainOutcome, Trainer};

/// Results of one fold of a full run.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldSummary {
    pub outcome: TrainOutcome,
    pub test_errors: Vec<f64>,
    pub crossvalidation_errors: Vec<f64>,
}

/// Loads and scales the data named by `config`, trains a fresh network
/// through every cross-validation fold and writes the report to
/// `config.output_file`. The latest test predictions go to `results_path`.
///
/// The network is initialised once from `rng` and carries its weights from
/// one fold into the next.
pub fn run<R: Rng>(config: &TrainingConfig, results_path: &Path, rng: &mut R) -> Result<Vec<FoldSummary>> {
    let mut dataset = Dataset::load(&config.data_file, config.in_columns, config.out_columns)?;
    config.scaling.apply(&mut dataset.patterns, &dataset.stats);

    let network = Network::new(
        &config.topology(),
        &config.weight_init(),
        config.hidden_activation,
        config.output_activation,
        rng,
    );

    let stats = dataset.stats;
    let mut trainer = Trainer::new(network, dataset.patterns, TrainConfig::from(config))?;

    // Only a run that passed every check replaces the previous report.
    let mut report = Report::create(&config.output_file)?;
    report.write_header(config, &stats)?;
    report.flush()?;

    let mut folds = Vec::with_capacity(config.k);
    for fold in 0..config.k {
        let outcome = trainer.train(fold);
        report.write_weights(fold, config.k, trainer.network())?;

        let test = trainer.test();
        write_results(results_path, &test)?;
        report.write_test(&test)?;

        let crossvalidation = trainer.crossvalidate(fold);
        report.write_crossvalidation(fold, config.k, &crossvalidation)?;
        report.flush()?;

        folds.push(FoldSummary {
            outcome,
            test_errors: test.error_percentages(),
            crossvalidation_errors: crossvalidation.error_percentages(),
        });
    }

    info!("report written to {}", config.output_file.display());
    Ok(folds)
}
