//! Per-tool test pipeline: checks, verdicts and the validator that runs them

pub mod checks;
mod invoker;
mod level;
mod pipeline;
mod samples;
mod traits;
mod verdict;

pub use invoker::{DEFAULT_INVOCATION_TIMEOUT, Invoker};
pub use level::ValidationLevel;
pub use pipeline::ToolValidator;
pub use samples::{SampleInput, generate_samples};
pub use traits::Check;
pub use verdict::{Severity, TestName, TestVerdict, ToolReport, compliance_score};
