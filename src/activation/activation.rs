use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;

use crate::error::{BpnnError, Result};

/// Activation applied element-wise by every neuron of a layer.
///
/// `beta` is the steepness of the curve; `Transfer` (the identity) has none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ActivationFunction {
    Transfer,
    Logistic { beta: f64 },
    Tanh { beta: f64 },
}

impl ActivationFunction {
    /// Builds an activation from its parameter-file name (`transfer`,
    /// `logistic`, `tanh`, any case). `beta` is ignored for `transfer`.
    pub fn from_name(name: &str, beta: f64) -> Result<ActivationFunction> {
        match name.trim().to_lowercase().as_str() {
            "transfer" => Ok(ActivationFunction::Transfer),
            "logistic" => Ok(ActivationFunction::Logistic { beta }),
            "tanh" => Ok(ActivationFunction::Tanh { beta }),
            other => Err(BpnnError::config(
                "activation function",
                format!("unknown activation '{other}', expected transfer, logistic or tanh"),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Transfer => "transfer",
            ActivationFunction::Logistic { .. } => "logistic",
            ActivationFunction::Tanh { .. } => "tanh",
        }
    }

    /// Steepness parameter; `1.0` for `Transfer`, whose slope never changes.
    pub fn beta(&self) -> f64 {
        match self {
            ActivationFunction::Transfer => 1.0,
            ActivationFunction::Logistic { beta } | ActivationFunction::Tanh { beta } => *beta,
        }
    }

    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Transfer => x,
            ActivationFunction::Logistic { beta } => 1.0 / (1.0 + E.powf(-2.0 * beta * x)),
            ActivationFunction::Tanh { beta } => (beta * x).tanh(),
        }
    }

    /// Analytic first derivative at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Transfer => 1.0,
            ActivationFunction::Logistic { beta } => {
                let fx = self.function(x);
                2.0 * beta * fx * (1.0 - fx)
            }
            ActivationFunction::Tanh { beta } => {
                let fx = self.function(x);
                beta * (1.0 - fx * fx)
            }
        }
    }

    /// Value and derivative in one call, as cached by a neuron after each
    /// forward pass.
    pub fn evaluate(&self, x: f64) -> (f64, f64) {
        (self.function(x), self.derivative(x))
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
