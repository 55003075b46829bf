// src/engine/runner.rs

use anyhow::Result;
use tracing::{info, warn};

use crate::commands::CommandSequence;
use crate::exec::Executor;

/// Aggregate result of the compile phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    Success,
    Failure,
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Success)
    }
}

/// What a full run reports back to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub compile: CompileOutcome,
    /// Number of passing test commands. Zero when the compile phase
    /// failed, since the test phase is then skipped.
    pub tests_passed: usize,
    /// Total number of test commands in the list.
    pub tests_total: usize,
}

/// Run the compile sequence in order, stopping at the first failure.
///
/// A command fails when it exits non-zero or dies to a signal; either
/// stops iteration immediately and no later command is ever spawned.
/// An empty sequence is trivially successful. Commands run strictly one
/// at a time: each is waited on before the next is considered.
pub fn run_compile_sequence(
    executor: &Executor,
    sequence: &CommandSequence,
) -> Result<CompileOutcome> {
    for command in sequence {
        let outcome = executor.run_one(command)?;
        if !outcome.passed() {
            warn!(cmd = %command, outcome = ?outcome, "compile command failed, stopping");
            return Ok(CompileOutcome::Failure);
        }
    }

    info!(commands = sequence.len(), "compile sequence succeeded");
    Ok(CompileOutcome::Success)
}

/// Run every test command in order and count the ones that pass.
///
/// Unlike the compile phase there is no early stop: each command is
/// spawned exactly once regardless of what came before it. A pass is a
/// normal exit with code zero and nothing else; signal deaths and
/// non-zero exits just don't count. An empty sequence yields 0.
pub fn run_test_sequence(executor: &Executor, sequence: &CommandSequence) -> Result<usize> {
    let mut passed = 0;
    for command in sequence {
        if executor.run_one(command)?.passed() {
            passed += 1;
        }
    }

    info!(passed, total = sequence.len(), "test sequence finished");
    Ok(passed)
}
