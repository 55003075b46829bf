// src/exec/process.rs

use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::commands::{tokenize, CommandLine};
use crate::config::Limits;
use crate::exec::redirect::{open_input, open_output, plan_redirections};

/// How often a bounded wait polls the child for completion.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How one child process ended.
///
/// Only `Exited(0)` is ever a pass; a non-zero exit and death by signal
/// are both failures, kept apart as distinct variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// Normal exit with the given code.
    Exited(i32),
    /// Abnormal termination by the given signal.
    Signaled(i32),
}

impl TerminationOutcome {
    /// True only for a normal exit with code zero.
    pub fn passed(&self) -> bool {
        matches!(self, TerminationOutcome::Exited(0))
    }
}

/// Runs one command at a time as a child process.
///
/// Strictly synchronous: every spawn is followed by a wait before the
/// call returns, so at most one child is ever outstanding and no child
/// outlives its `run_one` call.
#[derive(Debug, Clone)]
pub struct Executor {
    limits: Limits,
}

impl Executor {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Run a single command to completion and classify how it ended.
    ///
    /// Failures confined to the command itself (an unopenable redirection
    /// target, an empty argument vector, a program that cannot be executed)
    /// come back as failing [`TerminationOutcome`]s, never as `Err`.
    /// `Err` is reserved for the one fatal case: the spawner could not
    /// create a child at all, even after retrying transient errors.
    pub fn run_one(&self, command: &CommandLine) -> Result<TerminationOutcome> {
        info!(cmd = %command, "running command");

        let plan = match plan_redirections(tokenize(command.as_str())) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(cmd = %command, error = %err, "bad redirection clause");
                return Ok(TerminationOutcome::Exited(1));
            }
        };

        let Some((program, args)) = plan.argv.split_first() else {
            warn!(cmd = %command, "command has no program to run");
            return Ok(TerminationOutcome::Exited(1));
        };

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(path) = &plan.stdin {
            match open_input(path) {
                Ok(file) => {
                    cmd.stdin(Stdio::from(file));
                }
                Err(err) => {
                    warn!(cmd = %command, path = %path.display(), error = %err,
                        "cannot open input redirection target");
                    return Ok(TerminationOutcome::Exited(1));
                }
            }
        }

        if let Some(path) = &plan.stdout {
            match open_output(path) {
                Ok(file) => {
                    cmd.stdout(Stdio::from(file));
                }
                Err(err) => {
                    warn!(cmd = %command, path = %path.display(), error = %err,
                        "cannot open output redirection target");
                    return Ok(TerminationOutcome::Exited(1));
                }
            }
        }

        let mut child = match self.spawn_with_retry(&mut cmd) {
            Ok(child) => child,
            Err(err) => match exec_failure_code(&err) {
                // Bad program name or not executable: a failure of this
                // one command, with the code a shell would report.
                Some(code) => {
                    warn!(cmd = %command, error = %err, code, "cannot execute program");
                    return Ok(TerminationOutcome::Exited(code));
                }
                None => {
                    return Err(err).with_context(|| {
                        format!("spawning child for command {:?}", command.as_str())
                    });
                }
            },
        };

        let status = self
            .wait(&mut child)
            .with_context(|| format!("waiting for command {:?}", command.as_str()))?;

        let outcome = classify(status);
        info!(cmd = %command, outcome = ?outcome, passed = outcome.passed(), "command finished");
        Ok(outcome)
    }

    /// Spawn, retrying transient process-creation failures.
    ///
    /// Anything still failing after `spawn_attempts` tries is surfaced to
    /// the caller and is terminal for the whole run.
    fn spawn_with_retry(&self, cmd: &mut Command) -> io::Result<Child> {
        let mut attempt = 1;
        loop {
            match cmd.spawn() {
                Ok(child) => return Ok(child),
                Err(err) if is_transient(&err) && attempt < self.limits.spawn_attempts => {
                    debug!(attempt, error = %err, "transient spawn failure, retrying");
                    attempt += 1;
                    thread::sleep(self.limits.spawn_retry_delay);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Block until the child terminates.
    ///
    /// With no configured timeout this is a plain blocking wait, so a hung
    /// child blocks the whole sequence. With a timeout, the child is
    /// polled and killed once the deadline passes; the reaped status then
    /// classifies as death by SIGKILL. A timeout too large to form a
    /// deadline degrades to the unbounded wait.
    fn wait(&self, child: &mut Child) -> io::Result<ExitStatus> {
        let Some(timeout) = self.limits.wait_timeout else {
            return child.wait();
        };
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return child.wait();
        };
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                warn!(timeout = ?timeout, "child exceeded wait timeout, killing it");
                child.kill()?;
                return child.wait();
            }
            thread::sleep(WAIT_POLL_INTERVAL);
        }
    }
}

/// Turn a raw exit status into a [`TerminationOutcome`].
///
/// `ExitStatus::code()` is `None` exactly when the child did not exit
/// normally; the raw status value itself is never inspected.
fn classify(status: ExitStatus) -> TerminationOutcome {
    match status.code() {
        Some(code) => TerminationOutcome::Exited(code),
        None => TerminationOutcome::Signaled(termination_signal(status)),
    }
}

#[cfg(unix)]
fn termination_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(-1)
}

#[cfg(not(unix))]
fn termination_signal(_status: ExitStatus) -> i32 {
    -1
}

/// Spawn errors that mean "this program cannot be executed" rather than
/// "the system cannot create a process right now", mapped to the exit
/// code a shell would report: 127 for a program that cannot be found,
/// 126 for one that is found but not executable.
fn exec_failure_code(err: &io::Error) -> Option<i32> {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::InvalidInput => Some(127),
        io::ErrorKind::PermissionDenied => Some(126),
        _ => None,
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
    )
}
