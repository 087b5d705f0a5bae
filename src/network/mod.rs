pub mod init;
pub mod network;
pub mod neuron;

pub use init::WeightInit;
pub use network::{Network, Topology};
pub use neuron::Neuron;
