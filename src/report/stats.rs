//! Derived statistics over a suite run

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::suite::SuiteReport;
use crate::validation::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStatistics {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub test_success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStatistics {
    pub avg_tool_time: f64,
    pub min_tool_time: f64,
    pub max_tool_time: f64,
    pub total_execution_time: f64,
}

/// Tool counts per compliance bucket: >=90, 70-90, 50-70, <50
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub test_statistics: TestStatistics,
    pub performance_statistics: PerformanceStatistics,
    pub severity_breakdown: BTreeMap<Severity, usize>,
    pub compliance_distribution: ComplianceDistribution,
}

impl SummaryStats {
    /// `None` for a suite with no tools
    pub fn from_suite(report: &SuiteReport) -> Option<Self> {
        if report.tool_reports.is_empty() {
            return None;
        }

        let verdicts: Vec<_> = report.tool_reports.iter().flat_map(|r| r.verdicts.iter()).collect();
        let passed_tests = verdicts.iter().filter(|v| v.passed).count();
        let test_success_rate = if verdicts.is_empty() {
            0.0
        } else {
            passed_tests as f64 / verdicts.len() as f64 * 100.0
        };

        let times: Vec<f64> = report.tool_reports.iter().map(|r| r.duration_seconds).collect();

        let mut severity_breakdown = BTreeMap::new();
        for verdict in &verdicts {
            *severity_breakdown.entry(verdict.severity).or_insert(0) += 1;
        }

        let mut distribution = ComplianceDistribution::default();
        for tool in &report.tool_reports {
            match tool.compliance_score {
                s if s >= 90.0 => distribution.excellent += 1,
                s if s >= 70.0 => distribution.good += 1,
                s if s >= 50.0 => distribution.fair += 1,
                _ => distribution.poor += 1,
            }
        }

        Some(Self {
            test_statistics: TestStatistics {
                total_tests: verdicts.len(),
                passed_tests,
                failed_tests: verdicts.len() - passed_tests,
                test_success_rate,
            },
            performance_statistics: PerformanceStatistics {
                avg_tool_time: times.iter().sum::<f64>() / times.len() as f64,
                min_tool_time: times.iter().copied().fold(f64::INFINITY, f64::min),
                max_tool_time: times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                total_execution_time: report.duration_seconds,
            },
            severity_breakdown,
            compliance_distribution: distribution,
        })
    }
}
