//! Toolprobe - conformance and benchmark harness for tool services
//!
//! Toolprobe discovers the tools a service advertises, runs a fixed battery of
//! structural, behavioral and performance checks against each one, scores
//! the results and renders them as console, JSON, HTML or Markdown reports.

pub mod error;
pub mod protocol;
pub mod report;
pub mod suite;
pub mod tools;
pub mod validation;

pub use error::{ProbeError, Result, panic_message};
pub use suite::{SuiteReport, SuiteRunner};
pub use validation::{ToolReport, ToolValidator, ValidationLevel};
