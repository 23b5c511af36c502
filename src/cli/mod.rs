//! CLI module for toolprobe - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for full runs, single
//! tools, benchmarks, continuous mode and catalog inspection.

pub mod commands;

pub use commands::Cli;
