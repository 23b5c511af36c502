//! Self-contained HTML report

use std::fmt::Write;

use chrono::Local;

use crate::suite::SuiteReport;
use crate::validation::{Severity, TestVerdict};

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 2px solid #333; padding-bottom: 20px; margin-bottom: 30px; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 30px; }
        .metric { background: #f8f9fa; padding: 15px; border-radius: 6px; text-align: center; }
        .metric-value { font-size: 2em; font-weight: bold; color: #007bff; }
        .metric-label { color: #666; margin-top: 5px; }
        .tool { margin-bottom: 20px; border: 1px solid #ddd; border-radius: 6px; overflow: hidden; }
        .tool summary { padding: 15px; background: #f8f9fa; cursor: pointer; display: flex; justify-content: space-between; }
        .tool-name { font-weight: bold; font-size: 1.1em; }
        .status-pass { color: #28a745; }
        .status-fail { color: #dc3545; }
        .test-results { padding: 15px; }
        .test { margin-bottom: 10px; padding: 10px; border-left: 4px solid #ddd; background: #f9f9f9; }
        .test-pass { border-left-color: #28a745; }
        .test-fail { border-left-color: #dc3545; }
        .test-warning { border-left-color: #ffc107; }
        .progress-bar { width: 100%; height: 20px; background: #e9ecef; border-radius: 10px; overflow: hidden; margin-bottom: 30px; }
        .progress-fill { height: 100%; background: linear-gradient(90deg, #28a745, #ffc107, #dc3545); }
"#;

/// Escape text for element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn test_class(verdict: &TestVerdict) -> (&'static str, &'static str) {
    // Warnings are highlighted whether or not they passed
    if verdict.severity == Severity::Warning {
        ("test-warning", "⚠️")
    } else if verdict.passed {
        ("test-pass", "✅")
    } else {
        ("test-fail", "❌")
    }
}

fn metric(out: &mut String, value: &str, label: &str, class: &str) {
    let _ = write!(
        out,
        r#"
            <div class="metric">
                <div class="metric-value {}">{}</div>
                <div class="metric-label">{}</div>
            </div>"#,
        class, value, label
    );
}

pub fn render(report: &SuiteReport, timestamp: &str) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tool Validation Report - {timestamp}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Tool Validation Suite Report</h1>
            <p>Generated on {generated}</p>
        </div>
        <div class="summary">"#,
        timestamp = escape(timestamp),
        generated = Local::now().format("%Y-%m-%d %H:%M:%S"),
    );

    metric(&mut out, &report.total_tools.to_string(), "Total Tools", "");
    metric(&mut out, &report.passed_tools.to_string(), "Passed", "status-pass");
    metric(&mut out, &report.failed_tools.to_string(), "Failed", "status-fail");
    metric(&mut out, &format!("{:.1}%", report.success_rate()), "Success Rate", "");
    metric(&mut out, &format!("{:.1}%", report.overall_compliance_score), "Compliance Score", "");
    metric(&mut out, &format!("{:.2}s", report.duration_seconds), "Execution Time", "");

    let _ = write!(
        out,
        r#"
        </div>
        <div class="progress-bar">
            <div class="progress-fill" style="width: {:.1}%"></div>
        </div>
        <div class="tool-results">
            <h2>Tool Validation Results</h2>"#,
        report.overall_compliance_score.clamp(0.0, 100.0)
    );

    for tool in &report.tool_reports {
        let (status_class, status_icon) = if tool.overall_passed {
            ("status-pass", "✅")
        } else {
            ("status-fail", "❌")
        };
        let _ = write!(
            out,
            r#"
            <details class="tool"{open}>
                <summary>
                    <span class="tool-name">{icon} {name}</span>
                    <span class="{class}">Score: {score:.1}%</span>
                </summary>
                <div class="test-results">"#,
            open = if tool.overall_passed { "" } else { " open" },
            icon = status_icon,
            name = escape(&tool.tool_name),
            class = status_class,
            score = tool.compliance_score,
        );

        for verdict in &tool.verdicts {
            let (class, icon) = test_class(verdict);
            let _ = write!(
                out,
                r#"
                    <div class="test {class}">
                        <strong>{icon} {name}</strong><br>
                        {message}<br>
                        <small>Execution time: {time:.3}s</small>
                    </div>"#,
                name = verdict.test_name,
                message = escape(&verdict.message),
                time = verdict.duration_seconds,
            );
        }

        out.push_str(
            r#"
                </div>
            </details>"#,
        );
    }

    out.push_str(
        r#"
        </div>
    </div>
</body>
</html>
"#,
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{TestName, ToolReport};
    use std::time::Duration;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b>"x" & 'y'</b>"#), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_render_escapes_untrusted_text() {
        let tool = ToolReport::from_verdicts(
            "<script>",
            vec![TestVerdict::fail(TestName::ProtocolCompliance, "bad <name>", Severity::Warning)],
            Duration::ZERO,
        );
        let html = render(&SuiteReport::from_tool_reports(vec![tool], Duration::ZERO), "20240101_000000");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("bad &lt;name&gt;"));
        assert!(html.contains("test-warning"));
    }

    #[test]
    fn test_render_summary() {
        let html = render(&SuiteReport::from_tool_reports(Vec::new(), Duration::ZERO), "20240101_000000");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Tool Validation Report - 20240101_000000"));
        assert!(html.contains("width: 0.0%"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
