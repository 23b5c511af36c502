//! Markdown report: summary table plus one section per tool

use std::fmt::Write;

use chrono::Local;

use crate::suite::SuiteReport;
use crate::validation::{Severity, TestVerdict};

fn glyph(verdict: &TestVerdict) -> &'static str {
    if verdict.severity == Severity::Warning {
        "⚠️"
    } else if verdict.passed {
        "✅"
    } else {
        "❌"
    }
}

/// Summary table plus one section per tool
pub fn render(report: &SuiteReport, timestamp: &str) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "# Tool Validation Suite Report\n");
    let _ = writeln!(md, "**Generated:** {}  ", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(md, "**Report ID:** {}\n", timestamp);

    let _ = writeln!(md, "## Summary\n");
    let _ = writeln!(md, "| Metric | Value |");
    let _ = writeln!(md, "|--------|-------|");
    let _ = writeln!(md, "| Total Tools | {} |", report.total_tools);
    let _ = writeln!(md, "| Passed | {} ✅ |", report.passed_tools);
    let _ = writeln!(md, "| Failed | {} ❌ |", report.failed_tools);
    let _ = writeln!(md, "| Success Rate | {:.1}% |", report.success_rate());
    let _ = writeln!(md, "| Overall Compliance Score | {:.1}% |", report.overall_compliance_score);
    let _ = writeln!(md, "| Execution Time | {:.2}s |\n", report.duration_seconds);

    let _ = writeln!(md, "## Tool Results\n");
    for tool in &report.tool_reports {
        let status = if tool.overall_passed { "✅ PASSED" } else { "❌ FAILED" };
        let _ = writeln!(md, "### {} {}\n", status, tool.tool_name);
        let _ = writeln!(md, "**Compliance Score:** {:.1}%  ", tool.compliance_score);
        let _ = writeln!(md, "**Execution Time:** {:.3}s\n", tool.duration_seconds);
        let _ = writeln!(md, "#### Test Results\n");
        for verdict in &tool.verdicts {
            let _ = writeln!(md, "- {} **{}**: {}", glyph(verdict), verdict.test_name, verdict.message);
        }
        md.push('\n');
    }

    md
}
