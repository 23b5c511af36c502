//! Suite orchestration: full runs, single tools, continuous mode and benchmarks.
//!
//! Tools are validated strictly one after another so that the timing checks
//! never overlap. A panic escaping the pipeline is caught here and recorded
//! as a failed tool (or an infinite benchmark run); it never ends the suite.

use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;

use crate::error::panic_message;
use crate::protocol::ToolService;
use crate::report::{DEFAULT_FORMATS, Reporter};
use crate::tools::{ToolCatalog, ToolDefinition};
use crate::validation::{DEFAULT_INVOCATION_TIMEOUT, ToolReport, ToolValidator, ValidationLevel};

use super::summary::{BenchmarkStats, ContinuousSummary, SuiteReport};

/// Orchestrates validation of a whole tool service
pub struct SuiteRunner {
    service: Arc<dyn ToolService>,
    catalog: ToolCatalog,
    validator: ToolValidator,
    timeout: Duration,
    reporter: Reporter,
    formats: Vec<String>,
}

impl SuiteRunner {
    /// Runner at the standard level writing reports to `./validation_reports`
    pub fn new(service: Arc<dyn ToolService>) -> Self {
        let level = ValidationLevel::default();
        Self {
            catalog: ToolCatalog::new(Arc::clone(&service)),
            validator: ToolValidator::new(Arc::clone(&service), level, DEFAULT_INVOCATION_TIMEOUT),
            service,
            timeout: DEFAULT_INVOCATION_TIMEOUT,
            reporter: Reporter::default(),
            formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Per-invocation timeout; rebuilds the validator
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.validator = ToolValidator::new(Arc::clone(&self.service), self.validator.level(), timeout);
        self
    }

    pub fn with_level(mut self, level: ValidationLevel) -> Self {
        self.set_level(level);
        self
    }

    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Formats generated by `run_full(.., true)`
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn level(&self) -> ValidationLevel {
        self.validator.level()
    }

    /// Rebuild the validator for a new strictness level
    pub fn set_level(&mut self, level: ValidationLevel) {
        self.validator = ToolValidator::new(Arc::clone(&self.service), level, self.timeout);
        tracing::info!(level = %level, "Validation level set");
    }

    async fn validate_guarded(&self, tool: &ToolDefinition) -> ToolReport {
        match AssertUnwindSafe(self.validator.validate_tool(tool)).catch_unwind().await {
            Ok(report) => report,
            Err(payload) => {
                tracing::error!(
                    tool = tool.display_name(),
                    error = %panic_message(payload.as_ref()),
                    "Validation failed for tool"
                );
                ToolReport::failed(tool.display_name())
            }
        }
    }

    /// Validate every tool (or those named in `filter`; empty means all)
    ///
    /// Always yields a report, even for an empty or unreachable catalog.
    pub async fn run_full(&self, filter: &[String], generate_report: bool) -> SuiteReport {
        tracing::info!("Starting validation suite");
        let start = Instant::now();

        let tools = self.catalog.discover(true).await;
        let selected: Vec<&ToolDefinition> = tools
            .iter()
            .filter(|tool| filter.is_empty() || tool.name().is_some_and(|n| filter.iter().any(|f| f == n)))
            .collect();

        tracing::info!(tools = selected.len(), "Found tools to validate");

        let mut reports = Vec::with_capacity(selected.len());
        for tool in selected {
            let report = self.validate_guarded(tool).await;
            tracing::info!(
                tool = %report.tool_name,
                passed = report.overall_passed,
                score = report.compliance_score,
                "Tool validated"
            );
            reports.push(report);
        }

        let suite = SuiteReport::from_tool_reports(reports, start.elapsed());

        if generate_report {
            self.reporter.generate(&suite, &self.formats);
        }

        tracing::info!(
            passed = suite.passed_tools,
            total = suite.total_tools,
            "Validation complete"
        );
        suite
    }

    /// Validate one tool by name; `None` when the catalog has no such tool
    pub async fn run_one(&self, name: &str) -> Option<ToolReport> {
        let Some(tool) = self.catalog.get_details(name).await else {
            tracing::error!(tool = name, "Tool not found");
            return None;
        };
        Some(self.validate_guarded(&tool).await)
    }

    /// Repeat `run_full` every `interval` until `max_iterations` or `shutdown`
    ///
    /// There is no sleep after the final bounded iteration. When `shutdown`
    /// resolves mid-iteration the iteration is abandoned and not recorded.
    pub async fn run_continuous<F>(
        &self,
        interval: Duration,
        max_iterations: Option<u32>,
        shutdown: F,
    ) -> ContinuousSummary
    where
        F: Future<Output = ()>,
    {
        tracing::info!(interval_secs = interval.as_secs_f64(), "Starting continuous validation");
        tokio::pin!(shutdown);

        let mut summary = ContinuousSummary::default();
        let done = |completed: u32| max_iterations.is_some_and(|max| completed >= max);

        while !done(summary.iterations) {
            let iteration = summary.iterations + 1;
            tracing::info!(iteration, "Running validation iteration");

            let run = AssertUnwindSafe(self.run_full(&[], false)).catch_unwind();
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(iteration, "Continuous validation stopped");
                    summary.interrupted = true;
                    break;
                }
                outcome = run => {
                    summary.iterations = iteration;
                    match outcome {
                        Ok(report) => {
                            tracing::info!(
                                iteration,
                                passed = report.passed_tools,
                                total = report.total_tools,
                                score = report.overall_compliance_score,
                                "Iteration complete"
                            );
                            summary.last_report = Some(report);
                        }
                        Err(payload) => {
                            tracing::error!(
                                iteration,
                                error = %panic_message(payload.as_ref()),
                                "Error in validation iteration"
                            );
                            summary.failed_iterations += 1;
                        }
                    }
                }
            }

            if done(summary.iterations) {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Continuous validation stopped");
                    summary.interrupted = true;
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }

        summary
    }

    /// Run the pipeline `iterations` times per tool and time each run
    ///
    /// A run that panics counts as an infinite time and a non-success.
    pub async fn benchmark(&self, iterations: usize) -> BTreeMap<String, BenchmarkStats> {
        tracing::info!(iterations, "Starting tool benchmark");

        let tools = self.catalog.discover(true).await;
        let mut results = BTreeMap::new();

        for tool in tools.iter() {
            let name = tool.display_name();
            tracing::info!(tool = name, "Benchmarking tool");

            let mut times = Vec::with_capacity(iterations);
            let mut success_count = 0;

            for i in 0..iterations {
                let start = Instant::now();
                match AssertUnwindSafe(self.validator.validate_tool(tool)).catch_unwind().await {
                    Ok(report) => {
                        times.push(start.elapsed().as_secs_f64());
                        if report.overall_passed {
                            success_count += 1;
                        }
                    }
                    Err(payload) => {
                        tracing::warn!(
                            tool = name,
                            iteration = i + 1,
                            error = %panic_message(payload.as_ref()),
                            "Benchmark iteration failed"
                        );
                        times.push(f64::INFINITY);
                    }
                }
            }

            results.insert(name.to_string(), BenchmarkStats::from_runs(times, success_count));
        }

        results
    }
}
