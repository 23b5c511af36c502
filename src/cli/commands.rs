//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: validate every tool (the default)
//! - tool: validate a single tool
//! - benchmark: time repeated validations
//! - watch: continuous validation on an interval
//! - catalog: show categories and complexity of the discovered tools

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toolprobe::validation::ValidationLevel;

/// Toolprobe - conformance and benchmark harness for tool services
#[derive(Parser, Debug)]
#[command(name = "toolprobe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON-RPC endpoint of the service under audit (built-in tools if omitted)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate all tools and generate reports
    Run {
        /// Only validate these tools (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Report format: console, json, html, markdown (repeatable)
        #[arg(long)]
        format: Vec<String>,

        /// Output directory for report files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Validation level: basic, standard, strict
        #[arg(short, long)]
        level: Option<ValidationLevel>,
    },

    /// Validate a single tool
    Tool {
        /// Tool name
        name: String,

        /// Validation level: basic, standard, strict
        #[arg(short, long)]
        level: Option<ValidationLevel>,
    },

    /// Benchmark every tool over repeated validations
    Benchmark {
        /// Pipeline runs per tool
        #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        iterations: Option<usize>,

        /// Validation level: basic, standard, strict
        #[arg(short, long)]
        level: Option<ValidationLevel>,
    },

    /// Re-run the full suite on a fixed interval until interrupted
    Watch {
        /// Seconds between iterations
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Stop after this many iterations
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        max_iterations: Option<u32>,

        /// Validation level: basic, standard, strict
        #[arg(short, long)]
        level: Option<ValidationLevel>,
    },

    /// Show discovered tools by category with complexity metrics
    Catalog {
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },
}
