//! High-level operations

pub mod batch;
pub mod evaluate;

pub use batch::{evaluate_files, FileReport};
pub use evaluate::{evaluate_file, FileEvaluator, FileOutcome};
