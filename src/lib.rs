// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;

use std::path::PathBuf;

use anyhow::anyhow;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::commands::{read_commands, CommandSet};
use crate::config::loader::{default_config_path, load_and_validate};
use crate::config::ConfigFile;
use crate::engine::{run_compile_sequence, run_test_sequence, CompileOutcome, RunSummary};
use crate::errors::Result;
use crate::exec::Executor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (optional file)
/// - the command lists (fatal if either is missing or unreadable)
/// - the executor and the two sequence runs (compile, then test)
pub fn run(args: CliArgs) -> Result<RunSummary> {
    let cfg = load_config(&args)?;
    let (compile_path, test_path) = resolve_list_paths(&args, &cfg)?;

    // Startup contract: both lists must be readable before anything runs.
    let commands = read_commands(&compile_path, &test_path)?;
    info!(
        compile_list = %compile_path.display(),
        compile_commands = commands.compile.len(),
        test_list = %test_path.display(),
        test_commands = commands.test.len(),
        "command lists loaded"
    );

    if args.dry_run {
        print_dry_run(&commands);
        return Ok(RunSummary {
            compile: CompileOutcome::Success,
            tests_passed: 0,
            tests_total: commands.test.len(),
        });
    }

    let executor = Executor::new(cfg.limits.resolve());

    let compile = run_compile_sequence(&executor, &commands.compile)?;
    if !compile.is_success() {
        return Ok(RunSummary {
            compile,
            tests_passed: 0,
            tests_total: commands.test.len(),
        });
    }

    let tests_passed = run_test_sequence(&executor, &commands.test)?;
    Ok(RunSummary {
        compile,
        tests_passed,
        tests_total: commands.test.len(),
    })
}

/// Load the config file if one applies.
///
/// An explicit `--config` must load; the default `Graderun.toml` is only
/// loaded when it exists, and its absence silently means defaults.
fn load_config(args: &CliArgs) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return load_and_validate(path);
    }

    let default = default_config_path();
    if default.exists() {
        load_and_validate(&default)
    } else {
        debug!("no config file, using defaults");
        Ok(ConfigFile::default())
    }
}

/// Pick the list locations: positional arguments win over `[lists]`.
fn resolve_list_paths(args: &CliArgs, cfg: &ConfigFile) -> Result<(PathBuf, PathBuf)> {
    let compile = args
        .compile_list
        .clone()
        .or_else(|| cfg.lists.compile.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow!("no compile command list given (pass COMPILE_LIST or set [lists].compile)")
        })?;

    let test = args
        .test_list
        .clone()
        .or_else(|| cfg.lists.test.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            anyhow!("no test command list given (pass TEST_LIST or set [lists].test)")
        })?;

    Ok((compile, test))
}

/// Simple dry-run output: print both lists, execute nothing.
fn print_dry_run(commands: &CommandSet) {
    println!("graderun dry-run");
    println!();

    println!("compile commands ({}):", commands.compile.len());
    for command in &commands.compile {
        println!("  - {command}");
    }

    println!("test commands ({}):", commands.test.len());
    for command in &commands.test {
        println!("  - {command}");
    }

    debug!("dry-run complete (no execution)");
}
