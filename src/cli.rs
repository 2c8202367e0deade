// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::SourceKind;
use crate::watch::DEFAULT_POLL_INTERVAL;

/// Command-line arguments for `dirwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dirwatch",
    version,
    about = "Cron for filesystem changes: run commands when files appear in or vanish from directories.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the rule file.
    ///
    /// Default: `~/.dirwatch`.
    #[arg(value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append log output to this file instead of printing it.
    ///
    /// If omitted, `DIRWATCH_LOG_FILE` is used when set.
    #[arg(short = 'l', long = "log", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DIRWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Milliseconds between two stats of the same directory (poll source).
    #[arg(
        long,
        value_name = "MS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,

    /// How directory changes are detected.
    #[arg(long, value_enum, default_value_t = SourceKind::Poll)]
    pub source: SourceKind,

    /// Parse + validate the rules and print them, but don't watch anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
