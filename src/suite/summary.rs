//! Suite-level aggregates

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::validation::ToolReport;

/// Aggregate over every tool validated in one suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub total_tools: usize,
    pub passed_tools: usize,
    pub failed_tools: usize,
    pub tool_reports: Vec<ToolReport>,
    pub duration_seconds: f64,
    /// Mean of per-tool compliance scores, 0 with no tools
    pub overall_compliance_score: f64,
}

impl SuiteReport {
    pub fn from_tool_reports(tool_reports: Vec<ToolReport>, elapsed: Duration) -> Self {
        let total_tools = tool_reports.len();
        let passed_tools = tool_reports.iter().filter(|r| r.overall_passed).count();
        let overall_compliance_score = if total_tools == 0 {
            0.0
        } else {
            tool_reports.iter().map(|r| r.compliance_score).sum::<f64>() / total_tools as f64
        };

        Self {
            total_tools,
            passed_tools,
            failed_tools: total_tools - passed_tools,
            tool_reports,
            duration_seconds: elapsed.as_secs_f64(),
            overall_compliance_score,
        }
    }

    /// Percentage of tools that passed, 0 with no tools
    pub fn success_rate(&self) -> f64 {
        if self.total_tools == 0 {
            0.0
        } else {
            self.passed_tools as f64 / self.total_tools as f64 * 100.0
        }
    }

    pub fn tool(&self, name: &str) -> Option<&ToolReport> {
        self.tool_reports.iter().find(|r| r.tool_name == name)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ToolReport> {
        self.tool_reports.iter().filter(|r| !r.overall_passed)
    }
}

/// Timing statistics for one tool over repeated pipeline runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStats {
    pub iterations: usize,
    pub success_count: usize,
    /// Percentage of runs whose report passed overall
    pub success_rate: f64,
    pub avg_execution_time: f64,
    pub min_execution_time: f64,
    pub max_execution_time: f64,
    /// Wall time per run; infinite for a run that blew up
    pub execution_times: Vec<f64>,
}

impl BenchmarkStats {
    /// Aggregate per-run times. Statistics cover only the finite entries and
    /// are all 0 when there are none.
    pub fn from_runs(execution_times: Vec<f64>, success_count: usize) -> Self {
        let iterations = execution_times.len();
        let finite: Vec<f64> = execution_times.iter().copied().filter(|t| t.is_finite()).collect();

        let (avg, min, max) = if finite.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                finite.iter().sum::<f64>() / finite.len() as f64,
                finite.iter().copied().fold(f64::INFINITY, f64::min),
                finite.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        let success_rate = if iterations == 0 {
            0.0
        } else {
            success_count as f64 / iterations as f64 * 100.0
        };

        Self {
            iterations,
            success_count,
            success_rate,
            avg_execution_time: avg,
            min_execution_time: min,
            max_execution_time: max,
            execution_times,
        }
    }
}

/// Outcome of a continuous-mode session
#[derive(Debug, Clone, Default)]
pub struct ContinuousSummary {
    /// Iterations that ran to completion (successfully or not)
    pub iterations: u32,
    /// Iterations that blew up instead of producing a report
    pub failed_iterations: u32,
    /// Whether the session ended on the shutdown signal
    pub interrupted: bool,
    /// Report of the last iteration that completed
    pub last_report: Option<SuiteReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Severity, TestName, TestVerdict};

    fn report(name: &str, passed: bool, score_pass: usize, score_total: usize) -> ToolReport {
        let verdicts = (0..score_total)
            .map(|i| {
                if i < score_pass {
                    TestVerdict::pass(TestName::SchemaValidation, "ok")
                } else {
                    TestVerdict::fail(
                        TestName::ProtocolCompliance,
                        "no",
                        if passed { Severity::Warning } else { Severity::Error },
                    )
                }
            })
            .collect();
        ToolReport::from_verdicts(name, verdicts, Duration::ZERO)
    }

    #[test]
    fn test_suite_aggregates() {
        let suite = SuiteReport::from_tool_reports(
            vec![report("a", true, 4, 4), report("b", true, 1, 2), report("c", false, 0, 1)],
            Duration::from_secs(1),
        );
        assert_eq!(suite.total_tools, 3);
        assert_eq!(suite.passed_tools, 2);
        assert_eq!(suite.failed_tools, 1);
        assert_eq!(suite.passed_tools + suite.failed_tools, suite.total_tools);
        assert_eq!(suite.overall_compliance_score, 50.0);
        assert_eq!(suite.failed().count(), 1);
        assert!(suite.tool("b").is_some());
    }

    #[test]
    fn test_empty_suite() {
        let suite = SuiteReport::from_tool_reports(Vec::new(), Duration::ZERO);
        assert_eq!(suite.total_tools, 0);
        assert_eq!(suite.overall_compliance_score, 0.0);
        assert_eq!(suite.success_rate(), 0.0);
    }

    #[test]
    fn test_benchmark_all_failed() {
        let stats = BenchmarkStats::from_runs(vec![f64::INFINITY; 5], 0);
        assert_eq!(stats.iterations, 5);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.avg_execution_time, 0.0);
        assert_eq!(stats.min_execution_time, 0.0);
        assert_eq!(stats.max_execution_time, 0.0);
        assert!(stats.execution_times.iter().all(|t| t.is_infinite()));
    }

    #[test]
    fn test_benchmark_mixed() {
        let stats = BenchmarkStats::from_runs(vec![0.2, f64::INFINITY, 0.4], 2);
        assert!((stats.avg_execution_time - 0.3).abs() < 1e-9);
        assert_eq!(stats.min_execution_time, 0.2);
        assert_eq!(stats.max_execution_time, 0.4);
        assert!((stats.success_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_benchmark_zero_iterations() {
        let stats = BenchmarkStats::from_runs(Vec::new(), 0);
        assert_eq!(stats.success_rate, 0.0);
    }
}
