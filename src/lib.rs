pub mod activation;
pub mod config;
pub mod cost;
pub mod data;
pub mod error;
pub mod layers;
pub mod network;
pub mod optim;
pub mod report;
pub mod train;

// Convenience re-exports
pub use activation::ActivationFunction;
pub use config::{Mode, TrainingConfig};
pub use data::{Dataset, PatternTable, Scaling};
pub use error::{BpnnError, Result};
pub use layers::Layer;
pub use network::{Network, Neuron, Topology, WeightInit};
pub use optim::Sgd;
pub use train::{Evaluation, TrainConfig, Trainer};
