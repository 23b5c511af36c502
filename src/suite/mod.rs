//! Suite orchestrator and its aggregates

mod runner;
mod summary;

pub use runner::SuiteRunner;
pub use summary::{BenchmarkStats, ContinuousSummary, SuiteReport};
