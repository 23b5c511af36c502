//! Report rendering
//!
//! Turns a [`SuiteReport`] into console output and timestamped files. Each
//! format is rendered on its own: an unknown format is skipped with a
//! warning, and a failing writer is logged without stopping the others.

mod console;
mod html;
mod json;
mod markdown;
mod stats;

pub use console::render as render_console;
pub use html::{escape as escape_html, render as render_html};
pub use json::{JsonReport, JsonTest, JsonTool, REPORT_VERSION, ReportMetadata, ReportSummary};
pub use markdown::render as render_markdown;
pub use stats::{ComplianceDistribution, PerformanceStatistics, SummaryStats, TestStatistics};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, Result};
use crate::suite::SuiteReport;

/// Formats generated when none are requested
pub const DEFAULT_FORMATS: [&str; 3] = ["console", "json", "html"];

/// Default directory for report files
pub const DEFAULT_OUTPUT_DIR: &str = "validation_reports";

/// A supported report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Console,
    Json,
    Html,
    Markdown,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Console => "console",
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
            ReportFormat::Markdown => "markdown",
        }
    }

    /// File extension, `None` for console output
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ReportFormat::Console => None,
            ReportFormat::Json => Some("json"),
            ReportFormat::Html => Some("html"),
            ReportFormat::Markdown => Some("md"),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "console" => Ok(ReportFormat::Console),
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(ProbeError::Report(format!("Unknown report format: {}", other))),
        }
    }
}

/// Writes reports under an output directory
#[derive(Debug, Clone)]
pub struct Reporter {
    output_dir: PathBuf,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl Reporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a file report would be written to
    pub fn file_path(&self, format: ReportFormat, timestamp: &str) -> Option<PathBuf> {
        format
            .extension()
            .map(|ext| self.output_dir.join(format!("validation_report_{}.{}", timestamp, ext)))
    }

    /// Render every requested format
    ///
    /// Returns the files written, keyed by format. Console output is printed
    /// and produces no entry.
    pub fn generate<S: AsRef<str>>(
        &self,
        report: &SuiteReport,
        formats: &[S],
    ) -> BTreeMap<ReportFormat, PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut written = BTreeMap::new();

        for requested in formats {
            let requested = requested.as_ref();
            let format = match requested.parse::<ReportFormat>() {
                Ok(format) => format,
                Err(_) => {
                    tracing::warn!(format = requested, "Unknown report format, skipping");
                    continue;
                }
            };

            match self.write(format, report, &timestamp) {
                Ok(Some(path)) => {
                    tracing::info!(format = %format, path = %path.display(), "Report generated");
                    written.insert(format, path);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(format = %format, error = %e, "Failed to generate report");
                }
            }
        }

        written
    }

    fn write(&self, format: ReportFormat, report: &SuiteReport, timestamp: &str) -> Result<Option<PathBuf>> {
        let content = match format {
            ReportFormat::Console => {
                print!("{}", console::render(report));
                return Ok(None);
            }
            ReportFormat::Json => JsonReport::from_suite(report, timestamp).to_pretty_string()?,
            ReportFormat::Html => html::render(report, timestamp),
            ReportFormat::Markdown => markdown::render(report, timestamp),
        };

        let path = self
            .file_path(format, timestamp)
            .ok_or_else(|| ProbeError::Report(format!("{} has no file form", format)))?;
        std::fs::create_dir_all(&self.output_dir)?;
        std::fs::write(&path, content)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn empty_suite() -> SuiteReport {
        SuiteReport::from_tool_reports(Vec::new(), Duration::ZERO)
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert!("bogus".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_file_path() {
        let reporter = Reporter::new("/tmp/out");
        assert_eq!(
            reporter.file_path(ReportFormat::Markdown, "20240101_120000"),
            Some(PathBuf::from("/tmp/out/validation_report_20240101_120000.md"))
        );
        assert_eq!(reporter.file_path(ReportFormat::Console, "x"), None);
    }

    #[test]
    fn test_unknown_format_skipped() {
        let dir = TempDir::new().unwrap();
        let reporter = Reporter::new(dir.path());
        let written = reporter.generate(&empty_suite(), &["json", "bogus"]);
        assert_eq!(written.len(), 1);
        assert!(written[&ReportFormat::Json].exists());
    }

    #[test]
    fn test_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let reporter = Reporter::new(&nested);
        let written = reporter.generate(&empty_suite(), &["html", "markdown", "console"]);
        assert_eq!(written.len(), 2);
        assert!(nested.is_dir());
    }

    #[test]
    fn test_failing_writer_does_not_stop_others() {
        let dir = TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();
        let reporter = Reporter::new(&blocker);
        let written = reporter.generate(&empty_suite(), &["json", "console"]);
        assert!(written.is_empty());
    }
}
