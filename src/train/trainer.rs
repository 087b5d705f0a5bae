use log::{debug, info, warn};

use crate::config::params::Mode;
use crate::cost::EnergyCost;
use crate::data::patterns::PatternTable;
use crate::error::{BpnnError, Result};
use crate::network::network::Network;
use crate::train::evaluation::Evaluation;
use crate::train::train_config::TrainConfig;

/// Where the trainer is in a run. Evaluation phases remember the fold the
/// network was last trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Training for `fold` has finished; its held-out patterns can be evaluated.
    Trained { fold: usize },
    Testing { fold: usize },
    CrossValidating { fold: usize },
}

impl Phase {
    /// Fold of the most recent training run, if any.
    pub fn trained_fold(&self) -> Option<usize> {
        match *self {
            Phase::Idle => None,
            Phase::Trained { fold } | Phase::Testing { fold } | Phase::CrossValidating { fold } => Some(fold),
        }
    }
}

/// What one call to `Trainer::train` did.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub fold: usize,
    pub epochs: usize,
    /// Number of times pending changes were applied to the network.
    pub updates: usize,
    /// Pattern indices trained on in every epoch, in visiting order.
    pub trained_patterns: Vec<usize>,
    /// Mean energy over the patterns of the last epoch, measured before each
    /// pattern's own update.
    pub last_epoch_energy: f64,
}

/// Drives training and evaluation of one network over one pattern table.
///
/// The last `test_patterns` rows are the test block and are never trained on.
/// Every other row `i` belongs to fold `i % k`; training for a fold skips its
/// rows and cross-validation evaluates exactly those rows.
pub struct Trainer {
    network: Network,
    patterns: PatternTable,
    config: TrainConfig,
    phase: Phase,
}

impl Trainer {
    pub fn new(network: Network, patterns: PatternTable, config: TrainConfig) -> Result<Trainer> {
        if config.k == 0 {
            return Err(BpnnError::config("cross-validation k", "must be at least 1"));
        }
        if config.test_patterns > patterns.len() {
            return Err(BpnnError::config(
                "test patterns",
                format!("{} requested but only {} patterns loaded", config.test_patterns, patterns.len()),
            ));
        }
        Ok(Trainer { network, patterns, config, phase: Phase::Idle })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Rows before the test block.
    pub fn training_len(&self) -> usize {
        self.patterns.len() - self.config.test_patterns
    }

    fn is_held_out(&self, index: usize, fold: usize) -> bool {
        index % self.config.k == fold
    }

    /// Training rows used when `fold` is held out.
    pub fn training_indices(&self, fold: usize) -> Vec<usize> {
        (0..self.training_len()).filter(|&i| !self.is_held_out(i, fold)).collect()
    }

    /// Training rows held out for `fold`.
    pub fn fold_indices(&self, fold: usize) -> Vec<usize> {
        (0..self.training_len()).filter(|&i| self.is_held_out(i, fold)).collect()
    }

    /// Trains for the configured number of epochs, skipping the rows of
    /// `excluded`. The network keeps whatever state previous folds left it in.
    pub fn train(&mut self, excluded: usize) -> TrainOutcome {
        let indices = self.training_indices(excluded);
        let optimizer = self.config.optimizer;
        info!(
            "fold {excluded}: training on {} of {} patterns for {} epochs ({})",
            indices.len(), self.training_len(), self.config.epochs, self.config.mode
        );
        if indices.is_empty() {
            warn!("fold {excluded}: no patterns left to train on");
        }

        let mut updates = 0;
        let mut last_epoch_energy = 0.0;
        for epoch in 0..self.config.epochs {
            let mut energy = 0.0;
            for &index in &indices {
                let input = &self.patterns.inputs[index];
                let expected = &self.patterns.outputs[index];
                let output = optimizer.accumulate(&mut self.network, input, expected);
                energy += EnergyCost::cost(&output, expected);
                if self.config.mode == Mode::Online {
                    optimizer.step(&mut self.network);
                    updates += 1;
                }
            }
            if self.config.mode == Mode::Batch {
                optimizer.step(&mut self.network);
                updates += 1;
            }
            if !indices.is_empty() {
                last_epoch_energy = energy / indices.len() as f64;
            }
            debug!("fold {excluded} epoch {epoch}: mean energy {last_epoch_energy}");
        }

        self.phase = Phase::Trained { fold: excluded };
        TrainOutcome {
            fold: excluded,
            epochs: self.config.epochs,
            updates,
            trained_patterns: indices,
            last_epoch_energy,
        }
    }

    /// Evaluates the test block without touching the weights.
    pub fn test(&mut self) -> Evaluation {
        match self.phase.trained_fold() {
            Some(fold) => self.phase = Phase::Testing { fold },
            None => warn!("testing an untrained network"),
        }
        let indices: Vec<usize> = (self.training_len()..self.patterns.len()).collect();
        let eval = self.evaluate(&indices);
        info!("test: {} patterns, error {:?}%", eval.len(), eval.error_percentages());
        eval
    }

    /// Evaluates the rows held out when training for `included`.
    pub fn crossvalidate(&mut self, included: usize) -> Evaluation {
        match self.phase.trained_fold() {
            Some(fold) if fold == included => {}
            _ => warn!("cross-validating fold {included} while the trainer is in {:?}", self.phase),
        }
        if let Some(fold) = self.phase.trained_fold() {
            self.phase = Phase::CrossValidating { fold };
        }
        let indices = self.fold_indices(included);
        let eval = self.evaluate(&indices);
        info!(
            "cross-validation fold {included}: {} patterns, error {:?}%",
            eval.len(), eval.error_percentages()
        );
        eval
    }

    fn evaluate(&mut self, indices: &[usize]) -> Evaluation {
        let mut eval = Evaluation::new(self.network.output.size());
        for &index in indices {
            let predicted = self.network.propagate(&self.patterns.inputs[index]);
            eval.push(predicted, self.patterns.outputs[index].clone());
        }
        eval
    }
}
