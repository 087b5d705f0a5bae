use crate::config::params::{Mode, TrainingConfig};
use crate::optim::sgd::Sgd;

/// Settings for a `Trainer`.
///
/// # Fields
/// - `epochs`: full passes over the training patterns per fold
/// - `mode`: apply changes after every pattern (`Online`) or once
///   per epoch (`Batch`)
/// - `k`: fold count; pattern `i` belongs to fold `i % k`
/// - `test_patterns`: trailing patterns never trained on, used by `test`
/// - `optimizer`: learning rate and momentum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub mode: Mode,
    pub k: usize,
    pub test_patterns: usize,
    pub optimizer: Sgd,
}

impl TrainConfig {
    pub fn new(epochs: usize, mode: Mode, k: usize, test_patterns: usize, optimizer: Sgd) -> Self {
        TrainConfig { epochs, mode, k, test_patterns, optimizer }
    }
}

impl From<&TrainingConfig> for TrainConfig {
    fn from(config: &TrainingConfig) -> Self {
        TrainConfig::new(config.epochs, config.mode, config.k, config.test_patterns, config.sgd())
    }
}
