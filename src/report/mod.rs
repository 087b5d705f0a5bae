pub mod writer;

pub use writer::{write_results, Report};
