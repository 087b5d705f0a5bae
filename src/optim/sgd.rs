use crate::network::network::Network;

/// Gradient descent with a momentum term, the update rule of classical
/// back-propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64, momentum: f64) -> Sgd {
        Sgd { learning_rate, momentum }
    }

    /// Forward and backward pass for one pattern; the resulting changes stay
    /// pending in the network until `step`. Returns the network's outputs.
    pub fn accumulate(&self, network: &mut Network, input: &[f64], expected: &[f64]) -> Vec<f64> {
        let output = network.propagate(input);
        network.back_propagate(input, expected, self.learning_rate);
        output
    }

    /// Applies every pending change.
    pub fn step(&self, network: &mut Network) {
        network.update(self.momentum);
    }
}
