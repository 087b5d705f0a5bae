use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::network::init::WeightInit;
use crate::network::neuron::Neuron;

/// A fully-connected layer: every neuron sees every value of the layer below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new<R: Rng>(size: usize, input_size: usize, init: &WeightInit, rng: &mut R) -> Layer {
        let neurons = (0..size)
            .map(|_| Neuron::random(input_size, init, rng))
            .collect();
        Layer { neurons }
    }

    pub fn from_neurons(neurons: Vec<Neuron>) -> Layer {
        Layer { neurons }
    }

    pub fn size(&self) -> usize {
        self.neurons.len()
    }

    /// Activates every neuron on `input` and returns the layer's outputs.
    pub fn feed_from(&mut self, input: &[f64], activator: &ActivationFunction) -> Vec<f64> {
        self.neurons.iter_mut()
            .map(|neuron| neuron.activate(input, activator))
            .collect()
    }

    /// Outputs cached by the last `feed_from`.
    pub fn outputs(&self) -> Vec<f64> {
        self.neurons.iter().map(|n| n.output).collect()
    }

    /// Output-layer error signal: `delta = f'(sum) * (expected - output)`,
    /// then accumulates the pending changes against `upstream`.
    pub fn accumulate_output_deltas(&mut self, expected: &[f64], upstream: &[f64], learning_rate: f64) {
        for (neuron, target) in self.neurons.iter_mut().zip(expected.iter()) {
            neuron.delta = neuron.der_output * (target - neuron.output);
            neuron.accumulate(upstream, learning_rate);
        }
    }

    /// Hidden-layer error signal: the deltas of `next` weighted by the
    /// connections leaving each neuron of this layer, times `f'(sum)`.
    pub fn accumulate_hidden_deltas(&mut self, next: &Layer, upstream: &[f64], learning_rate: f64) {
        for (index, neuron) in self.neurons.iter_mut().enumerate() {
            let back = next.neurons.iter()
                .map(|n| n.weights[index] * n.delta)
                .sum::<f64>();
            neuron.delta = back * neuron.der_output;
            neuron.accumulate(upstream, learning_rate);
        }
    }

    pub fn apply_update(&mut self, momentum: f64) {
        for neuron in &mut self.neurons {
            neuron.apply_update(momentum);
        }
    }
}
