//! End-to-end suite integration tests
//!
//! Drives the orchestrator against the in-process tool service with the
//! built-in tools plus purpose-built handlers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

use toolprobe::protocol::{
    LocalToolService, ServiceError, ServiceRequest, ServiceResponse, ToolHandler, ToolService,
};
use toolprobe::report::{JsonReport, ReportFormat, Reporter};
use toolprobe::suite::SuiteRunner;
use toolprobe::tools::{ToolCatalog, ToolDefinition};
use toolprobe::validation::{Severity, TestName, ToolValidator, ValidationLevel};

/// Handler with a fixed definition and a scripted reply
struct Scripted {
    definition: ToolDefinition,
    reply: fn(&Map<String, Value>) -> ServiceResponse,
}

#[async_trait]
impl ToolHandler for Scripted {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn call(&self, arguments: &Map<String, Value>) -> ServiceResponse {
        (self.reply)(arguments)
    }
}

/// Handler that panics on every invocation
struct Exploding;

#[async_trait]
impl ToolHandler for Exploding {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("exploding", "Always blows up when called")
    }

    async fn call(&self, _arguments: &Map<String, Value>) -> ServiceResponse {
        panic!("handler raised");
    }
}

fn builtin_service() -> Arc<LocalToolService> {
    Arc::new(LocalToolService::with_builtin_tools("integration"))
}

fn documented(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition::new(name, description).with_schema(json!({
        "type": "object",
        "properties": {"message": {"type": "string", "description": "Text to process"}},
        "required": ["message"]
    }))
}

/// Scenario A: the three built-in tools, echo fully compliant
#[tokio::test]
async fn test_builtin_tools_full_run() {
    let runner = SuiteRunner::new(builtin_service());
    let suite = runner.run_full(&[], false).await;

    assert_eq!(suite.total_tools, 3);
    assert_eq!(suite.passed_tools + suite.failed_tools, suite.total_tools);

    let echo = suite.tool("echo").expect("echo validated");
    assert_eq!(echo.verdicts.len(), 7);
    assert!(echo.overall_passed);
    assert_eq!(echo.compliance_score, 100.0);

    let mean = suite.tool_reports.iter().map(|r| r.compliance_score).sum::<f64>() / 3.0;
    assert!((suite.overall_compliance_score - mean).abs() < 1e-9);

    for report in &suite.tool_reports {
        let passed = report.verdicts.iter().filter(|v| v.passed).count();
        let expected = 100.0 * passed as f64 / report.verdicts.len() as f64;
        assert_eq!(report.compliance_score, expected);
    }
}

/// Scenario B: a too-short description is only a warning
#[tokio::test]
async fn test_short_description_still_passes() {
    let service = LocalToolService::new("integration").with_handler(Arc::new(Scripted {
        definition: documented("tiny", "Short"),
        reply: |args| {
            if args.contains_key("message") {
                ServiceResponse::text("done")
            } else {
                ServiceResponse::error(ServiceError::invalid_params("message is required"))
            }
        },
    }));
    let runner = SuiteRunner::new(Arc::new(service));
    let report = runner.run_one("tiny").await.expect("tool exists");

    let protocol = report.verdict(TestName::ProtocolCompliance).expect("protocol check ran");
    assert!(!protocol.passed);
    assert_eq!(protocol.severity, Severity::Warning);
    assert!(report.overall_passed);
    assert!(report.compliance_score < 100.0);
}

/// Scenario C: a handler that always raises
#[tokio::test]
async fn test_benchmark_of_raising_handler() {
    let service = LocalToolService::new("integration").with_handler(Arc::new(Exploding));
    let runner = SuiteRunner::new(Arc::new(service));
    let results = runner.benchmark(5).await;

    let stats = &results["exploding"];
    assert_eq!(stats.iterations, 5);
    assert_eq!(stats.success_count, 0);
    assert_eq!(stats.success_rate, 0.0);
    assert_eq!(stats.execution_times.len(), 5);
    assert!(stats.execution_times.iter().all(|t| t.is_infinite()));
    assert_eq!(stats.avg_execution_time, 0.0);
    assert_eq!(stats.min_execution_time, 0.0);
    assert_eq!(stats.max_execution_time, 0.0);
}

/// Scenario D: unknown formats are skipped, known ones still written
#[tokio::test]
async fn test_unknown_report_format_skipped() {
    let dir = TempDir::new().unwrap();
    let runner = SuiteRunner::new(builtin_service());
    let suite = runner.run_full(&[], false).await;

    let written = Reporter::new(dir.path()).generate(&suite, &["json", "bogus"]);
    assert_eq!(written.len(), 1);
    let path = &written[&ReportFormat::Json];
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("validation_report_"));

    let restored = JsonReport::parse(&std::fs::read_to_string(path).unwrap())
        .unwrap()
        .into_suite_report();
    assert_eq!(restored, suite);
}

#[tokio::test]
async fn test_missing_name_short_circuits() {
    let validator = ToolValidator::new(builtin_service(), ValidationLevel::Standard, Duration::from_secs(5));
    let tool = ToolDefinition::from_value(json!({
        "description": "A tool that forgot its name",
        "inputSchema": {"type": "object", "properties": {}}
    }));
    let report = validator.validate_tool(&tool).await;

    assert_eq!(report.verdicts.len(), 1);
    assert_eq!(report.verdicts[0].test_name, TestName::SchemaValidation);
    assert!(!report.verdicts[0].passed);
    assert_eq!(report.verdicts[0].severity, Severity::Critical);
}

#[tokio::test]
async fn test_error_handling_structured_vs_silent() {
    let service = LocalToolService::new("integration")
        .with_handler(Arc::new(Scripted {
            definition: documented("strict_tool", "Rejects anything malformed"),
            reply: |args| match args.get("message") {
                Some(Value::String(_)) if args.len() == 1 => ServiceResponse::text("ok"),
                _ => ServiceResponse::error(ServiceError::invalid_params("bad arguments")),
            },
        }))
        .with_handler(Arc::new(Scripted {
            definition: documented("lax_tool", "Accepts anything at all"),
            reply: |_| ServiceResponse::text("whatever"),
        }));
    let runner = SuiteRunner::new(Arc::new(service));

    let strict = runner.run_one("strict_tool").await.unwrap();
    assert!(strict.verdict(TestName::ErrorHandling).unwrap().passed);

    let lax = runner.run_one("lax_tool").await.unwrap();
    let verdict = lax.verdict(TestName::ErrorHandling).unwrap();
    assert!(!verdict.passed);
    assert_eq!(verdict.severity, Severity::Warning);
}

#[tokio::test]
async fn test_cached_discovery_hides_new_tools_until_refresh() {
    let service = builtin_service();
    let catalog = ToolCatalog::new(Arc::clone(&service) as Arc<dyn ToolService>);

    let first = catalog.discover(true).await;
    let second = catalog.discover(true).await;
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    service
        .register(Arc::new(Scripted {
            definition: documented("late_tool", "Registered after discovery"),
            reply: |_| ServiceResponse::text("late"),
        }))
        .await;

    assert_eq!(catalog.discover(true).await.len(), 3);
    assert_eq!(catalog.refresh().await.len(), 4);
    assert!(catalog.get_details("late_tool").await.is_some());
}

#[tokio::test]
async fn test_empty_catalog_still_reports() {
    let runner = SuiteRunner::new(Arc::new(LocalToolService::new("empty")));
    let suite = runner.run_full(&[], false).await;
    assert_eq!(suite.total_tools, 0);
    assert_eq!(suite.overall_compliance_score, 0.0);
    assert_eq!(suite.success_rate(), 0.0);
}

#[tokio::test]
async fn test_levels_change_check_set() {
    let mut runner = SuiteRunner::new(builtin_service()).with_level(ValidationLevel::Basic);
    let basic = runner.run_one("echo").await.unwrap();
    assert_eq!(basic.verdicts.len(), 4);

    runner.set_level(ValidationLevel::Strict);
    let strict = runner.run_one("echo").await.unwrap();
    assert_eq!(strict.verdicts.len(), 7);
    let perf = strict.verdict(TestName::PerformanceTest).unwrap();
    assert_eq!(perf.details["execution_times"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_continuous_mode_bounded() {
    let runner = SuiteRunner::new(builtin_service());
    let summary = runner
        .run_continuous(Duration::from_millis(5), Some(3), std::future::pending())
        .await;
    assert_eq!(summary.iterations, 3);
    assert!(!summary.interrupted);
    assert!(summary.last_report.is_some());
}

/// Catalog whose list request always panics
struct CrashingCatalog;

#[async_trait]
impl ToolService for CrashingCatalog {
    async fn handle(&self, _request: ServiceRequest) -> toolprobe::Result<ServiceResponse> {
        panic!("catalog crashed");
    }
}

#[tokio::test]
async fn test_crashing_catalog_still_reports() {
    let runner = SuiteRunner::new(Arc::new(CrashingCatalog));
    let suite = runner.run_full(&[], false).await;
    assert_eq!(suite.total_tools, 0);
    assert!(runner.run_one("echo").await.is_none());
    assert!(runner.benchmark(3).await.is_empty());
}

#[tokio::test]
async fn test_list_shaped_properties_fail_schema() {
    let validator = ToolValidator::new(builtin_service(), ValidationLevel::Standard, Duration::from_secs(5));
    let tool = ToolDefinition::new("ghostly", "Declares its properties as a list").with_schema(json!({
        "type": "object",
        "properties": ["path"],
        "required": ["ghost"]
    }));
    let report = validator.validate_tool(&tool).await;

    assert_eq!(report.verdicts.len(), 1);
    assert!(report.verdicts[0].is_critical_failure());
    assert!(!report.overall_passed);
    assert_eq!(report.compliance_score, 0.0);
}
