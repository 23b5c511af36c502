//! Console report rendered as colored text

use std::fmt::Write;

use colored::Colorize;

use crate::suite::SuiteReport;

const RULE_WIDTH: usize = 60;

/// Fixed-layout terminal summary of a suite run
pub fn render(report: &SuiteReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "{}", "TOOL VALIDATION SUITE REPORT".bold());
    let _ = writeln!(out, "{}", rule);

    let _ = writeln!(out, "\n{}", "SUMMARY".bold());
    let _ = writeln!(out, "   Total Tools: {}", report.total_tools);
    let _ = writeln!(out, "   Passed: {} {}", report.passed_tools, "✓".green());
    let _ = writeln!(out, "   Failed: {} {}", report.failed_tools, "✗".red());
    let _ = writeln!(out, "   Success Rate: {:.1}%", report.success_rate());
    let _ = writeln!(out, "   Overall Compliance Score: {:.1}%", report.overall_compliance_score);
    let _ = writeln!(out, "   Execution Time: {:.2}s", report.duration_seconds);

    let _ = writeln!(out, "\n{}", "TOOL RESULTS".bold());
    for tool in &report.tool_reports {
        let status = if tool.overall_passed { "✓".green() } else { "✗".red() };
        let _ = writeln!(
            out,
            "   {} {:<20} Score: {:5.1}% Time: {:.3}s",
            status, tool.tool_name, tool.compliance_score, tool.duration_seconds
        );
    }

    let failed: Vec<_> = report.failed().collect();
    if !failed.is_empty() {
        let _ = writeln!(out, "\n{}", "FAILED TOOLS DETAILS".red().bold());
        for tool in failed {
            let _ = writeln!(out, "\n   Tool: {}", tool.tool_name);
            for verdict in tool.failures() {
                let _ = writeln!(out, "     {} {}: {}", "✗".red(), verdict.test_name, verdict.message);
            }
        }
    }

    let fastest = report
        .tool_reports
        .iter()
        .min_by(|a, b| a.duration_seconds.total_cmp(&b.duration_seconds));
    let slowest = report
        .tool_reports
        .iter()
        .max_by(|a, b| a.duration_seconds.total_cmp(&b.duration_seconds));
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        let average = report.tool_reports.iter().map(|r| r.duration_seconds).sum::<f64>()
            / report.tool_reports.len() as f64;
        let _ = writeln!(out, "\n{}", "PERFORMANCE".bold());
        let _ = writeln!(out, "   Average Tool Validation Time: {:.3}s", average);
        let _ = writeln!(out, "   Fastest: {} ({:.3}s)", fastest.tool_name, fastest.duration_seconds);
        let _ = writeln!(out, "   Slowest: {} ({:.3}s)", slowest.tool_name, slowest.duration_seconds);
    }

    let _ = writeln!(out, "\n{}", rule);
    out
}
