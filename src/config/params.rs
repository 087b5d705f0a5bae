use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::config::parser::parse_params;
use crate::data::scaling::Scaling;
use crate::error::{BpnnError, Result};
use crate::network::{Topology, WeightInit};
use crate::optim::Sgd;

/// When pending weight changes are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Once per epoch, after every training pattern has been seen.
    Batch,
    /// After every training pattern.
    Online,
}

impl FromStr for Mode {
    type Err = BpnnError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "batch" => Ok(Mode::Batch),
            "online" => Ok(Mode::Online),
            other => Err(BpnnError::config(
                "mode",
                format!("unknown mode '{other}', expected batch or online"),
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Batch => write!(f, "batch"),
            Mode::Online => write!(f, "online"),
        }
    }
}

fn default_cost_function() -> String {
    "energy".to_string()
}

/// Everything a training run needs, fixed once loaded.
///
/// Fields appear in the order of the parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub data_file: PathBuf,
    pub in_columns: usize,
    pub out_columns: usize,
    /// Width of each hidden layer; its length is the hidden-layer count.
    pub hidden_layers: Vec<usize>,
    pub scaling: Scaling,
    pub weight_range: (f64, f64),
    pub threshold_range: (f64, f64),
    pub epochs: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub mode: Mode,
    /// Number of trailing patterns held out for `test`.
    pub test_patterns: usize,
    /// Cross-validation fold count.
    pub k: usize,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
    /// Informational label; only "energy" is known.
    #[serde(default = "default_cost_function")]
    pub cost_function: String,
    pub output_file: PathBuf,
}

impl TrainingConfig {
    /// Loads and validates a parameter file. Files ending in `.json` are read
    /// as JSON, anything else as the line-pair text format.
    pub fn load(path: impl AsRef<Path>) -> Result<TrainingConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| BpnnError::io(path, e))?;
        let is_json = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str::<TrainingConfig>(&text)?
        } else {
            parse_params(&text)?
        };
        config.validate()?;
        info!("read parameters from {}", path.display());
        Ok(config)
    }

    /// Rejects values the trainer cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.in_columns == 0 {
            return Err(BpnnError::config("input columns", "must be at least 1"));
        }
        if self.out_columns == 0 {
            return Err(BpnnError::config("output columns", "must be at least 1"));
        }
        if let Some(layer) = self.hidden_layers.iter().position(|&n| n == 0) {
            return Err(BpnnError::config(
                "nodes per layer",
                format!("hidden layer {layer} has no nodes"),
            ));
        }
        if self.k == 0 {
            return Err(BpnnError::config("cross-validation k", "must be at least 1"));
        }
        if self.cost_function != "energy" {
            warn!("cost function '{}' is not known; it is only reported", self.cost_function);
        }
        Ok(())
    }

    pub fn topology(&self) -> Topology {
        Topology {
            inputs: self.in_columns,
            hidden: self.hidden_layers.clone(),
            outputs: self.out_columns,
        }
    }

    pub fn weight_init(&self) -> WeightInit {
        WeightInit::new(self.weight_range, self.threshold_range)
    }

    pub fn sgd(&self) -> Sgd {
        Sgd::new(self.learning_rate, self.momentum)
    }
}

impl fmt::Display for TrainingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reading file: {}", self.data_file.display())?;
        write!(f, "Architecture of the Neural Network: {}:", self.in_columns)?;
        for nodes in &self.hidden_layers {
            write!(f, "{nodes}:")?;
        }
        writeln!(f, "{}", self.out_columns)?;
        writeln!(f, "Type of data scaling: {}", self.scaling)?;
        writeln!(f, "Range used for weights: [{}, {}]", self.weight_range.0, self.weight_range.1)?;
        writeln!(f, "Range used for thresholds: [{}, {}]", self.threshold_range.0, self.threshold_range.1)?;
        writeln!(f, "Number of Epochs used: {}", self.epochs)?;
        writeln!(f, "Learning Rate: {}", self.learning_rate)?;
        writeln!(f, "Momentum: {}", self.momentum)?;
        writeln!(f, "Training mode: {}", self.mode)?;
        writeln!(f, "Using {} patterns for tests", self.test_patterns)?;
        writeln!(f, "Using k-fold cross-validation with k = {}", self.k)?;
        writeln!(
            f,
            "Using {} activation function for the hidden layers with b = {} and {} for the output layer with b = {}",
            self.hidden_activation,
            self.hidden_activation.beta(),
            self.output_activation,
            self.output_activation.beta(),
        )?;
        writeln!(f, "Using {} as cost function", self.cost_function)
    }
}
