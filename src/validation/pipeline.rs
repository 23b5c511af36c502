//! Per-tool validation pipeline.
//!
//! Runs an ordered list of checks against one tool definition:
//! 1. Every check runs in order, one at a time
//! 2. A check that returns `Err` becomes a failing error verdict
//! 3. A failing critical verdict stops the pipeline; later checks are not recorded

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::protocol::ToolService;
use crate::tools::ToolDefinition;

use super::checks;
use super::invoker::Invoker;
use super::level::ValidationLevel;
use super::traits::Check;
use super::verdict::{ToolReport, TestVerdict};

/// Validator for individual tools.
pub struct ToolValidator {
    level: ValidationLevel,
    checks: Vec<Box<dyn Check>>,
}

impl ToolValidator {
    /// Create a validator with the checks of `level`.
    pub fn new(service: Arc<dyn ToolService>, level: ValidationLevel, timeout: Duration) -> Self {
        let invoker = Invoker::new(service, timeout);
        Self {
            level,
            checks: checks::for_level(level, &invoker),
        }
    }

    /// Replace the check list.
    pub fn with_checks(mut self, checks: Vec<Box<dyn Check>>) -> Self {
        self.checks = checks;
        self
    }

    /// Level this validator was built for.
    pub fn level(&self) -> ValidationLevel {
        self.level
    }

    /// Number of checks in the pipeline.
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Run the pipeline over one tool.
    pub async fn validate_tool(&self, tool: &ToolDefinition) -> ToolReport {
        let tool_name = tool.display_name();
        tracing::info!(tool = tool_name, level = %self.level, "Starting validation");

        let start = Instant::now();
        let mut verdicts = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let check_start = Instant::now();
            let verdict = match check.evaluate(tool).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    tracing::error!(tool = tool_name, check = %check.name(), error = %e, "Check raised");
                    TestVerdict::exception(check.name(), &e)
                }
            }
            .with_duration(check_start.elapsed());

            let critical = verdict.is_critical_failure();
            verdicts.push(verdict);

            if critical {
                tracing::error!(tool = tool_name, check = %check.name(), "Critical failure, skipping remaining checks");
                break;
            }
        }

        let report = ToolReport::from_verdicts(tool_name, verdicts, start.elapsed());
        tracing::info!(
            tool = tool_name,
            passed = report.overall_passed,
            score = report.compliance_score,
            "Validation complete"
        );
        report
    }
}
