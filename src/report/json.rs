//! Machine-readable JSON report
//!
//! The document carries every field of the suite, tool and verdict records,
//! so `JsonReport::into_suite_report` reconstructs the original exactly.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::suite::SuiteReport;
use crate::validation::{Severity, TestName, TestVerdict, ToolReport};

pub const REPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report id, `YYYYmmdd_HHMMSS`
    pub timestamp: String,
    /// RFC 3339 generation time
    pub generation_time: String,
    pub report_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_tools: usize,
    pub passed_tools: usize,
    pub failed_tools: usize,
    pub success_rate: f64,
    pub overall_compliance_score: f64,
    pub execution_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonTest {
    pub name: TestName,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
    pub execution_time: f64,
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonTool {
    pub name: String,
    pub passed: bool,
    pub compliance_score: f64,
    pub execution_time: f64,
    pub tests: Vec<JsonTest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub tools: Vec<JsonTool>,
}

impl From<&TestVerdict> for JsonTest {
    fn from(v: &TestVerdict) -> Self {
        Self {
            name: v.test_name,
            passed: v.passed,
            message: v.message.clone(),
            severity: v.severity,
            execution_time: v.duration_seconds,
            details: v.details.clone(),
        }
    }
}

impl From<JsonTest> for TestVerdict {
    fn from(t: JsonTest) -> Self {
        Self {
            test_name: t.name,
            passed: t.passed,
            message: t.message,
            details: t.details,
            severity: t.severity,
            duration_seconds: t.execution_time,
        }
    }
}

impl From<&ToolReport> for JsonTool {
    fn from(r: &ToolReport) -> Self {
        Self {
            name: r.tool_name.clone(),
            passed: r.overall_passed,
            compliance_score: r.compliance_score,
            execution_time: r.duration_seconds,
            tests: r.verdicts.iter().map(JsonTest::from).collect(),
        }
    }
}

impl From<JsonTool> for ToolReport {
    fn from(t: JsonTool) -> Self {
        Self {
            tool_name: t.name,
            overall_passed: t.passed,
            verdicts: t.tests.into_iter().map(TestVerdict::from).collect(),
            compliance_score: t.compliance_score,
            duration_seconds: t.execution_time,
        }
    }
}

impl JsonReport {
    pub fn from_suite(report: &SuiteReport, timestamp: &str) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: timestamp.to_string(),
                generation_time: Local::now().to_rfc3339(),
                report_version: REPORT_VERSION.to_string(),
            },
            summary: ReportSummary {
                total_tools: report.total_tools,
                passed_tools: report.passed_tools,
                failed_tools: report.failed_tools,
                success_rate: report.success_rate(),
                overall_compliance_score: report.overall_compliance_score,
                execution_time: report.duration_seconds,
            },
            tools: report.tool_reports.iter().map(JsonTool::from).collect(),
        }
    }

    /// Rebuild the suite this document was generated from
    pub fn into_suite_report(self) -> SuiteReport {
        SuiteReport {
            total_tools: self.summary.total_tools,
            passed_tools: self.summary.passed_tools,
            failed_tools: self.summary.failed_tools,
            tool_reports: self.tools.into_iter().map(ToolReport::from).collect(),
            duration_seconds: self.summary.execution_time,
            overall_compliance_score: self.summary.overall_compliance_score,
        }
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
