//! Performance check: timed invocations with the first sample input
//!
//! Failed invocations are timed as infinite and left out of the average.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ProbeError, Result};
use crate::tools::ToolDefinition;
use crate::validation::invoker::Invoker;
use crate::validation::samples::generate_samples;
use crate::validation::traits::Check;
use crate::validation::verdict::{Severity, TestName, TestVerdict};

const EXCELLENT_SECS: f64 = 0.1;
const GOOD_SECS: f64 = 0.5;
const ACCEPTABLE_SECS: f64 = 2.0;

/// Rating bucket for an average invocation time
pub fn rating(avg_secs: f64) -> &'static str {
    if avg_secs <= EXCELLENT_SECS {
        "excellent"
    } else if avg_secs <= GOOD_SECS {
        "good"
    } else if avg_secs <= ACCEPTABLE_SECS {
        "acceptable"
    } else {
        "poor"
    }
}

/// Times repeated invocations with the first sample input
pub struct PerformanceCheck {
    invoker: Invoker,
    runs: usize,
    limit_secs: f64,
}

impl PerformanceCheck {
    pub fn new(invoker: Invoker, runs: usize, limit_secs: f64) -> Self {
        Self {
            invoker,
            runs,
            limit_secs,
        }
    }
}

#[async_trait]
impl Check for PerformanceCheck {
    fn name(&self) -> TestName {
        TestName::PerformanceTest
    }

    async fn evaluate(&self, tool: &ToolDefinition) -> Result<TestVerdict> {
        let Some(sample) = generate_samples(tool).into_iter().next() else {
            return Ok(TestVerdict::pass(
                self.name(),
                "Performance test skipped - no valid test cases",
            ));
        };

        let mut times = Vec::with_capacity(self.runs);
        for _ in 0..self.runs {
            let start = Instant::now();
            let elapsed = match self.invoker.call(tool.display_name(), sample.arguments.clone()).await {
                Ok(_) => start.elapsed().as_secs_f64(),
                Err(_) => f64::INFINITY,
            };
            times.push(elapsed);
        }

        let finite: Vec<f64> = times.iter().copied().filter(|t| t.is_finite()).collect();
        if finite.is_empty() {
            return Err(ProbeError::Check(format!(
                "No timed invocation of {} completed",
                tool.display_name()
            )));
        }
        let average = finite.iter().sum::<f64>() / finite.len() as f64;
        let rating = rating(average);

        tracing::debug!(tool = tool.display_name(), average, rating, "Performance measured");

        let message = format!("Performance: {} (avg: {:.3}s)", rating, average);
        let verdict = if average <= self.limit_secs {
            TestVerdict::pass(self.name(), message)
        } else {
            TestVerdict::fail(self.name(), message, Severity::Warning)
        };

        // Non-finite entries serialize as null
        Ok(verdict
            .with_detail("average_execution_time", json!(average))
            .with_detail("execution_times", json!(times))
            .with_detail("performance_rating", json!(rating)))
    }
}
