use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::layers::dense::Layer;
use crate::network::init::WeightInit;

/// Shape of a multilayer perceptron: input width, hidden widths, output width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: Vec<usize>,
    pub outputs: usize,
}

/// A fully-connected multilayer perceptron trained by back-propagation.
///
/// Hidden layers are stored in input-to-output order; the output layer is
/// kept apart because it uses its own activation and error signal. With no
/// hidden layers the output layer reads the raw input pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub hidden: Vec<Layer>,
    pub output: Layer,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
}

impl Network {
    /// Allocates every layer of `topology` with weights and thresholds drawn
    /// from `init`.
    pub fn new<R: Rng>(
        topology: &Topology,
        init: &WeightInit,
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
        rng: &mut R,
    ) -> Network {
        let mut input_size = topology.inputs;
        let mut hidden = Vec::with_capacity(topology.hidden.len());
        for &size in &topology.hidden {
            hidden.push(Layer::new(size, input_size, init, rng));
            input_size = size;
        }
        let output = Layer::new(topology.outputs, input_size, init, rng);
        Network { hidden, output, hidden_activation, output_activation }
    }

    /// Assembles a network from prepared layers, e.g. with hand-picked weights.
    pub fn from_layers(
        hidden: Vec<Layer>,
        output: Layer,
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
    ) -> Network {
        Network { hidden, output, hidden_activation, output_activation }
    }

    pub fn topology(&self) -> Topology {
        let inputs = self.hidden.first()
            .unwrap_or(&self.output)
            .neurons
            .first()
            .map_or(0, |n| n.input_size());
        Topology {
            inputs,
            hidden: self.hidden.iter().map(Layer::size).collect(),
            outputs: self.output.size(),
        }
    }

    /// Forward pass. Overwrites every neuron's `output` and `der_output` and
    /// returns the output layer's activations; nothing else changes.
    pub fn propagate(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.hidden {
            current = layer.feed_from(&current, &self.hidden_activation);
        }
        self.output.feed_from(&current, &self.output_activation)
    }

    /// Outputs of the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.output.outputs()
    }

    /// Computes every error signal for the pattern last propagated and adds
    /// `learning_rate * delta * upstream` to the pending weight changes.
    ///
    /// Changes accumulate until `update`, so the same routine serves online
    /// training (one pattern per update) and batch training (one epoch per
    /// update).
    pub fn back_propagate(&mut self, input: &[f64], expected: &[f64], learning_rate: f64) {
        let upstream = match self.hidden.last() {
            Some(layer) => layer.outputs(),
            None => input.to_vec(),
        };
        self.output.accumulate_output_deltas(expected, &upstream, learning_rate);

        for index in (0..self.hidden.len()).rev() {
            let (below, rest) = self.hidden.split_at_mut(index);
            let (layer, above) = rest.split_at_mut(1);
            let next = above.first().unwrap_or(&self.output);
            let upstream = match below.last() {
                Some(prev) => prev.outputs(),
                None => input.to_vec(),
            };
            layer[0].accumulate_hidden_deltas(next, &upstream, learning_rate);
        }
    }

    /// Applies and clears the pending changes of every neuron, adding
    /// `momentum` times the changes applied by the previous update.
    pub fn update(&mut self, momentum: f64) {
        for layer in &mut self.hidden {
            layer.apply_update(momentum);
        }
        self.output.apply_update(momentum);
    }
}
