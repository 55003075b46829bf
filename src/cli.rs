// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The two command lists can come either from the positional arguments or
//! from the `[lists]` section of the config file; positionals win. See
//! `lib.rs` for how the two are merged.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `graderun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "graderun",
    version,
    about = "Run a compile command list, then a test command list, and report the results.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the file holding the compile commands, one per line.
    ///
    /// Falls back to `[lists].compile` in the config file when omitted.
    #[arg(value_name = "COMPILE_LIST")]
    pub compile_list: Option<PathBuf>,

    /// Path to the file holding the test commands, one per line.
    ///
    /// Falls back to `[lists].test` in the config file when omitted.
    #[arg(value_name = "TEST_LIST")]
    pub test_list: Option<PathBuf>,

    /// Path to an optional config file (TOML).
    ///
    /// If omitted, `Graderun.toml` is used when it exists in the current
    /// working directory; otherwise built-in defaults apply.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GRADERUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse the config and both command lists, print them, but execute
    /// nothing.
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
