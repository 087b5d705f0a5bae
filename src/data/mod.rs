pub mod patterns;
pub mod scaling;
pub mod stats;

pub use patterns::{Dataset, PatternTable};
pub use scaling::Scaling;
pub use stats::{ColumnStats, DatasetStats};
