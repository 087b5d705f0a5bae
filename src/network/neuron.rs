use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::network::init::WeightInit;

/// A single perceptron unit together with its back-propagation bookkeeping.
///
/// `weights`, `delta_weights` and `old_delta_weights` always have one entry
/// per incoming connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    /// Activation value from the last forward pass.
    pub output: f64,
    /// Activation derivative at the last weighted sum, reused by backprop.
    pub der_output: f64,
    pub weights: Vec<f64>,
    /// Pending weight changes, summed until the next update.
    pub delta_weights: Vec<f64>,
    /// Weight changes applied by the previous update (momentum term).
    pub old_delta_weights: Vec<f64>,
    pub threshold: f64,
    pub delta_threshold: f64,
    pub old_delta_threshold: f64,
    /// Error signal from the last backward pass.
    pub delta: f64,
}

impl Neuron {
    /// A neuron with the given weights and threshold and all accumulators at zero.
    pub fn with_weights(weights: Vec<f64>, threshold: f64) -> Neuron {
        let n = weights.len();
        Neuron {
            output: 0.0,
            der_output: 0.0,
            weights,
            delta_weights: vec![0.0; n],
            old_delta_weights: vec![0.0; n],
            threshold,
            delta_threshold: 0.0,
            old_delta_threshold: 0.0,
            delta: 0.0,
        }
    }

    pub fn random<R: Rng>(input_size: usize, init: &WeightInit, rng: &mut R) -> Neuron {
        let weights = (0..input_size).map(|_| init.weight(rng)).collect();
        let threshold = init.threshold(rng);
        Neuron::with_weights(weights, threshold)
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    /// Weighted sum of `inputs` plus threshold, passed through `activator`.
    pub fn activate(&mut self, inputs: &[f64], activator: &ActivationFunction) -> f64 {
        debug_assert_eq!(inputs.len(), self.weights.len(), "input width does not match weights");
        let sum = inputs.iter()
            .zip(self.weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>() + self.threshold;
        let (output, der_output) = activator.evaluate(sum);
        self.output = output;
        self.der_output = der_output;
        output
    }

    /// Adds this pattern's contribution `lr * delta * upstream_i` to the
    /// pending weight and threshold changes.
    pub fn accumulate(&mut self, upstream: &[f64], learning_rate: f64) {
        let step = learning_rate * self.delta;
        for (dw, x) in self.delta_weights.iter_mut().zip(upstream.iter()) {
            *dw += step * x;
        }
        self.delta_threshold += step;
    }

    /// Applies the pending changes plus the momentum term, remembers them for
    /// the next update and clears the accumulators.
    pub fn apply_update(&mut self, momentum: f64) {
        for ((w, dw), old) in self.weights.iter_mut()
            .zip(self.delta_weights.iter_mut())
            .zip(self.old_delta_weights.iter_mut())
        {
            *w += *dw + momentum * *old;
            *old = *dw;
            *dw = 0.0;
        }
        self.threshold += self.delta_threshold + momentum * self.old_delta_threshold;
        self.old_delta_threshold = self.delta_threshold;
        self.delta_threshold = 0.0;
    }
}
