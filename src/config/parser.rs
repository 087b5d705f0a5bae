//! Line-pair parameter file.
//!
//! The first line is a free-form header. Every parameter then takes two
//! lines: a label (conventionally `# ...`) and the value. Parameters come in
//! a fixed order:
//!
//! ```text
//! Backpropagation parameters
//! # Data file
//! iris.dat
//! # Input columns
//! 4
//! # Output columns
//! 1
//! # Hidden layers
//! 1
//! # Nodes per hidden layer
//! 5
//! # Scaling (none, normal, mean)
//! normal
//! # Weight range
//! -0.5 0.5
//! # Threshold range
//! 0 0
//! # Epochs
//! 500
//! # Learning rate
//! 0.1
//! # Momentum
//! 0.9
//! # Mode (batch, online)
//! online
//! # Test patterns
//! 10
//! # Cross-validation k
//! 4
//! # Hidden activation and beta
//! logistic 1
//! # Output activation and beta
//! logistic 1
//! # Cost function
//! energy
//! # Output file
//! report.txt
//! ```

use std::path::PathBuf;
use std::str::{FromStr, Lines};

use crate::activation::ActivationFunction;
use crate::config::params::{Mode, TrainingConfig};
use crate::data::scaling::Scaling;
use crate::error::{BpnnError, Result};

/// One label/value pair. `label` names the field in error messages.
struct Field {
    label: String,
    value: String,
}

impl Field {
    fn error(&self, message: impl Into<String>) -> BpnnError {
        BpnnError::config(self.label.clone(), message)
    }

    /// Re-attributes an error raised while interpreting this field's value.
    fn relabel(&self, err: BpnnError) -> BpnnError {
        match err {
            BpnnError::Config { message, .. } => self.error(message),
            other => other,
        }
    }

    fn tokens(&self) -> std::str::SplitWhitespace<'_> {
        self.value.split_whitespace()
    }

    fn text(&self) -> String {
        self.value.trim().to_string()
    }

    fn number<T: FromStr>(&self) -> Result<T> {
        self.numbers(1).map(|mut v| v.remove(0))
    }

    /// The first `count` whitespace-separated values; anything after them is ignored.
    fn numbers<T: FromStr>(&self, count: usize) -> Result<Vec<T>> {
        let mut tokens = self.tokens();
        (0..count)
            .map(|i| {
                let token = tokens.next()
                    .ok_or_else(|| self.error(format!("expected {count} value(s), found {i}")))?;
                token.parse::<T>()
                    .map_err(|_| self.error(format!("'{token}' is not a valid number")))
            })
            .collect()
    }

    fn range(&self) -> Result<(f64, f64)> {
        let v = self.numbers::<f64>(2)?;
        Ok((v[0], v[1]))
    }

    fn activation(&self) -> Result<ActivationFunction> {
        let mut tokens = self.tokens();
        let name = tokens.next().ok_or_else(|| self.error("missing activation name"))?;
        let beta = tokens.next()
            .ok_or_else(|| self.error("missing activation parameter"))?
            .parse::<f64>()
            .map_err(|_| self.error("activation parameter is not a valid number"))?;
        ActivationFunction::from_name(name, beta).map_err(|e| self.relabel(e))
    }
}

struct PairReader<'a> {
    lines: Lines<'a>,
}

impl<'a> PairReader<'a> {
    /// Reads the next label/value pair. `name` stands in for the label when
    /// the file ends early.
    fn field(&mut self, name: &str) -> Result<Field> {
        let label_line = self.lines.next()
            .ok_or_else(|| BpnnError::config(name, "missing from parameter file"))?;
        let label = label_line.trim_end_matches('\r');
        let label = label.get(1..).unwrap_or("").trim().to_string();
        let label = if label.is_empty() { name.to_string() } else { label };
        let value = self.lines.next()
            .ok_or_else(|| BpnnError::config(label.clone(), "missing value"))?
            .trim_end_matches('\r')
            .to_string();
        Ok(Field { label, value })
    }
}

/// Parses the text form of a `TrainingConfig`. No validation beyond field syntax.
pub fn parse_params(text: &str) -> Result<TrainingConfig> {
    let mut lines = text.lines();
    lines.next().ok_or_else(|| BpnnError::config("header", "parameter file is empty"))?;
    let mut reader = PairReader { lines };

    let field = reader.field("data file")?;
    let data_file = PathBuf::from(field.text());
    if data_file.as_os_str().is_empty() {
        return Err(field.error("missing data file name"));
    }
    let in_columns = reader.field("input columns")?.number::<usize>()?;
    let out_columns = reader.field("output columns")?.number::<usize>()?;
    let n_hidden = reader.field("hidden layers")?.number::<usize>()?;
    let hidden_layers = reader.field("nodes per layer")?.numbers::<usize>(n_hidden)?;

    let field = reader.field("scaling")?;
    let scaling = field.text().parse::<Scaling>().map_err(|e| field.relabel(e))?;
    let weight_range = reader.field("weight range")?.range()?;
    let threshold_range = reader.field("threshold range")?.range()?;
    let epochs = reader.field("epochs")?.number::<usize>()?;
    let learning_rate = reader.field("learning rate")?.number::<f64>()?;
    let momentum = reader.field("momentum")?.number::<f64>()?;

    let field = reader.field("mode")?;
    let mode = field.text().parse::<Mode>().map_err(|e| field.relabel(e))?;
    let test_patterns = reader.field("test patterns")?.number::<usize>()?;
    let k = reader.field("cross-validation k")?.number::<usize>()?;
    let hidden_activation = reader.field("hidden activation")?.activation()?;
    let output_activation = reader.field("output activation")?.activation()?;
    let cost_function = reader.field("cost function")?.text().to_lowercase();

    let field = reader.field("output file")?;
    let output_file = PathBuf::from(field.text());
    if output_file.as_os_str().is_empty() {
        return Err(field.error("missing output file name"));
    }

    Ok(TrainingConfig {
        data_file,
        in_columns,
        out_columns,
        hidden_layers,
        scaling,
        weight_range,
        threshold_range,
        epochs,
        learning_rate,
        momentum,
        mode,
        test_patterns,
        k,
        hidden_activation,
        output_activation,
        cost_function,
        output_file,
    })
}
