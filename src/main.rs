use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use toolprobe::protocol::{HttpToolService, LocalToolService, ToolService};
use toolprobe::report::Reporter;
use toolprobe::suite::SuiteRunner;
use toolprobe::tools::ToolCategory;
use toolprobe::validation::{Severity, ToolReport, ValidationLevel};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(default_filter: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolprobe")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolprobe.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_service(cli: &Cli, config: &Config) -> Result<Arc<dyn ToolService>> {
    match cli.endpoint.as_ref().or(config.target.endpoint.as_ref()) {
        Some(endpoint) => {
            info!("Auditing remote service at {}", endpoint);
            let service = HttpToolService::new(endpoint.as_str(), config.validation.invocation_timeout())
                .context("Failed to create HTTP client")?;
            Ok(Arc::new(service))
        }
        None => {
            info!("Auditing built-in tools");
            Ok(Arc::new(LocalToolService::with_builtin_tools("toolprobe-builtin")))
        }
    }
}

fn build_runner(service: Arc<dyn ToolService>, config: &Config, level: Option<ValidationLevel>) -> SuiteRunner {
    SuiteRunner::new(service)
        .with_timeout(config.validation.invocation_timeout())
        .with_level(level.unwrap_or(config.validation.level))
        .with_reporter(Reporter::new(&config.reports.output_dir))
        .with_formats(config.reports.formats.clone())
}

fn verdict_icon(passed: bool, severity: Severity) -> ColoredString {
    if severity == Severity::Warning && !passed {
        "!".yellow()
    } else if passed {
        "✓".green()
    } else {
        "✗".red()
    }
}

fn print_tool_report(report: &ToolReport) {
    let status = if report.overall_passed {
        "PASSED".green()
    } else {
        "FAILED".red()
    };
    println!("\nTool '{}' validation: {}", report.tool_name, status);
    println!("Compliance Score: {:.1}%", report.compliance_score);
    println!("Execution Time: {:.3}s", report.duration_seconds);
    println!("\nTest Results:");
    for verdict in &report.verdicts {
        println!(
            "  {} {}: {}",
            verdict_icon(verdict.passed, verdict.severity),
            verdict.test_name,
            verdict.message
        );
    }
}

async fn handle_run_command(
    runner: SuiteRunner,
    filter: &[String],
    formats: &[String],
    output: Option<&PathBuf>,
) -> Result<()> {
    info!("Running full validation suite");
    let mut runner = runner;
    if let Some(dir) = output {
        runner = runner.with_reporter(Reporter::new(dir));
    }
    if !formats.is_empty() {
        runner = runner.with_formats(formats.to_vec());
    }

    let suite = runner.run_full(filter, false).await;
    let written = runner.reporter().generate(&suite, runner.formats());

    if !written.is_empty() {
        println!("\n{}", "Generated Reports:".cyan());
        for (format, path) in &written {
            println!("  {}: {}", format.as_str().to_uppercase(), path.display());
        }
    }
    Ok(())
}

async fn handle_tool_command(runner: SuiteRunner, name: &str) -> Result<()> {
    info!("Validating tool: {}", name);
    match runner.run_one(name).await {
        Some(report) => {
            print_tool_report(&report);
            Ok(())
        }
        None => {
            println!("{} Tool '{}' not found", "Error:".red(), name);
            eyre::bail!("Tool '{}' not found", name)
        }
    }
}

async fn handle_benchmark_command(runner: SuiteRunner, iterations: usize) -> Result<()> {
    info!("Running benchmark with {} iterations", iterations);
    let results = runner.benchmark(iterations).await;

    println!("\n{}", "=== BENCHMARK RESULTS ===".bold());
    for (tool_name, stats) in &results {
        println!("\n{}:", tool_name.cyan());
        println!("  Success Rate: {:.1}%", stats.success_rate);
        println!("  Average Time: {:.3}s", stats.avg_execution_time);
        println!(
            "  Min/Max Time: {:.3}s / {:.3}s",
            stats.min_execution_time, stats.max_execution_time
        );
    }
    Ok(())
}

async fn handle_watch_command(runner: SuiteRunner, interval: Duration, max_iterations: Option<u32>) -> Result<()> {
    info!("Starting continuous validation (interval: {:?})", interval);
    println!(
        "{} every {}s (Ctrl-C to stop)",
        "Watching:".green(),
        interval.as_secs()
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let summary = runner.run_continuous(interval, max_iterations, shutdown).await;

    println!(
        "\n{} {} iteration(s), {} failed{}",
        "Stopped:".yellow(),
        summary.iterations,
        summary.failed_iterations,
        if summary.interrupted { " (interrupted)" } else { "" }
    );
    if let Some(report) = summary.last_report {
        println!(
            "Last run: {}/{} passed, score {:.1}%",
            report.passed_tools, report.total_tools, report.overall_compliance_score
        );
    }
    Ok(())
}

async fn handle_catalog_command(runner: SuiteRunner, json: bool) -> Result<()> {
    let catalog = runner.catalog();

    if json {
        let registry = catalog.registry().await;
        println!("{}", serde_json::to_string_pretty(&registry).context("Failed to serialize registry")?);
        return Ok(());
    }

    let categories = catalog.categorize().await;
    let complexity = catalog.analyze_complexity().await;

    for category in ToolCategory::ALL {
        let tools = categories.get(&category).map(Vec::as_slice).unwrap_or_default();
        if tools.is_empty() {
            continue;
        }
        println!("\n{}", category.as_str().bold());
        for tool in tools {
            let name = tool.display_name();
            match complexity.get(name) {
                Some(m) => println!(
                    "  {:<20} {} params ({} required), {} (score {:.1})",
                    name, m.parameter_count, m.required_parameters, m.complexity_level.as_str(), m.complexity_score
                ),
                None => println!("  {}", name),
            }
        }
    }

    let info = catalog.cache_info().await;
    println!("\n{} {} tool(s) cached", "Catalog:".green(), info.cached_tools);
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let service = build_service(cli, config)?;

    match &cli.command {
        None => handle_run_command(build_runner(service, config, None), &[], &[], None).await,
        Some(Commands::Run {
            filter,
            format,
            output,
            level,
        }) => handle_run_command(build_runner(service, config, *level), filter, format, output.as_ref()).await,
        Some(Commands::Tool { name, level }) => handle_tool_command(build_runner(service, config, *level), name).await,
        Some(Commands::Benchmark { iterations, level }) => {
            let iterations = iterations.unwrap_or(config.benchmark.iterations);
            handle_benchmark_command(build_runner(service, config, *level), iterations).await
        }
        Some(Commands::Watch {
            interval,
            max_iterations,
            level,
        }) => {
            let interval = Duration::from_secs(interval.unwrap_or(config.continuous.interval_secs));
            let max_iterations = max_iterations.or(config.continuous.max_iterations);
            handle_watch_command(build_runner(service, config, *level), interval, max_iterations).await
        }
        Some(Commands::Catalog { json }) => handle_catalog_command(build_runner(service, config, None), *json).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; it decides the default log filter
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_filter()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
