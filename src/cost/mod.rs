pub mod energy;

pub use energy::EnergyCost;
