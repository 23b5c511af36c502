//! Verdicts and per-tool reports
//!
//! A TestVerdict is the outcome of one check against one tool; a ToolReport
//! aggregates the verdicts of one pipeline pass. Both are immutable once built.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProbeError;

/// How much a failing verdict matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    /// Only error and critical verdicts can fail a tool overall
    pub fn fails_tool(&self) -> bool {
        matches!(self, Severity::Error | Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed set of checks, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestName {
    SchemaValidation,
    ProtocolCompliance,
    ExecutionTest,
    ErrorHandling,
    PerformanceTest,
    SecurityCheck,
    InputValidation,
}

impl TestName {
    /// Pipeline order
    pub const ALL: [TestName; 7] = [
        TestName::SchemaValidation,
        TestName::ProtocolCompliance,
        TestName::ExecutionTest,
        TestName::ErrorHandling,
        TestName::PerformanceTest,
        TestName::SecurityCheck,
        TestName::InputValidation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestName::SchemaValidation => "schema_validation",
            TestName::ProtocolCompliance => "protocol_compliance",
            TestName::ExecutionTest => "execution_test",
            TestName::ErrorHandling => "error_handling",
            TestName::PerformanceTest => "performance_test",
            TestName::SecurityCheck => "security_check",
            TestName::InputValidation => "input_validation",
        }
    }
}

impl std::fmt::Display for TestName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one check against one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVerdict {
    pub test_name: TestName,
    pub passed: bool,
    pub message: String,
    /// Check-specific payload
    pub details: Map<String, Value>,
    pub severity: Severity,
    pub duration_seconds: f64,
}

impl TestVerdict {
    /// Passing verdict (always info severity)
    pub fn pass(test_name: TestName, message: impl Into<String>) -> Self {
        Self {
            test_name,
            passed: true,
            message: message.into(),
            details: Map::new(),
            severity: Severity::Info,
            duration_seconds: 0.0,
        }
    }

    /// Failing verdict with the given severity
    pub fn fail(test_name: TestName, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            test_name,
            passed: false,
            message: message.into(),
            details: Map::new(),
            severity,
            duration_seconds: 0.0,
        }
    }

    /// Verdict for a list of findings: passes when empty, otherwise fails
    /// with `severity` and the findings joined after `failure_prefix`
    pub fn from_issues(
        test_name: TestName,
        issues: &[String],
        pass_message: &str,
        failure_prefix: &str,
        severity: Severity,
    ) -> Self {
        if issues.is_empty() {
            Self::pass(test_name, pass_message)
        } else {
            Self::fail(
                test_name,
                format!("{}: {}", failure_prefix, issues.join("; ")),
                severity,
            )
        }
    }

    /// Failing error verdict for a check that could not run
    pub fn exception(test_name: TestName, error: &ProbeError) -> Self {
        Self::fail(
            test_name,
            format!("Test threw exception: {}", error),
            Severity::Error,
        )
        .with_detail("exception", Value::String(error.to_string()))
    }

    /// Attach one detail entry
    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }

    /// Stamp the wall time spent producing this verdict
    pub fn with_duration(mut self, elapsed: Duration) -> Self {
        self.duration_seconds = elapsed.as_secs_f64();
        self
    }

    /// Failed with critical severity; halts the pipeline
    pub fn is_critical_failure(&self) -> bool {
        !self.passed && self.severity == Severity::Critical
    }
}

/// All verdicts of one pipeline pass over one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReport {
    pub tool_name: String,
    pub overall_passed: bool,
    pub verdicts: Vec<TestVerdict>,
    pub compliance_score: f64,
    pub duration_seconds: f64,
}

impl ToolReport {
    /// Aggregate verdicts in pipeline order
    pub fn from_verdicts(tool_name: impl Into<String>, verdicts: Vec<TestVerdict>, elapsed: Duration) -> Self {
        let compliance_score = compliance_score(&verdicts);
        let overall_passed = verdicts
            .iter()
            .all(|v| v.passed || !v.severity.fails_tool());

        Self {
            tool_name: tool_name.into(),
            overall_passed,
            verdicts,
            compliance_score,
            duration_seconds: elapsed.as_secs_f64(),
        }
    }

    /// Zero-score failure for a tool whose validation blew up outside the pipeline
    pub fn failed(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            overall_passed: false,
            verdicts: Vec::new(),
            compliance_score: 0.0,
            duration_seconds: 0.0,
        }
    }

    /// Number of passing verdicts
    pub fn passed_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.passed).count()
    }

    /// Verdicts that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &TestVerdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }

    /// Verdict for a given check, if it ran
    pub fn verdict(&self, name: TestName) -> Option<&TestVerdict> {
        self.verdicts.iter().find(|v| v.test_name == name)
    }
}

/// `100 * passed / total`, 0 for no verdicts
pub fn compliance_score(verdicts: &[TestVerdict]) -> f64 {
    if verdicts.is_empty() {
        return 0.0;
    }
    let passed = verdicts.iter().filter(|v| v.passed).count();
    passed as f64 / verdicts.len() as f64 * 100.0
}
