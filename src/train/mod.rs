pub mod evaluation;
pub mod session;
pub mod train_config;
pub mod trainer;

pub use evaluation::Evaluation;
pub use session::{run, FoldSummary};
pub use train_config::TrainConfig;
pub use trainer::{Phase, TrainOutcome, Trainer};
