pub mod params;
pub mod parser;

pub use params::{Mode, TrainingConfig};
pub use parser::parse_params;
