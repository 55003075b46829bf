#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::tempdir;

use graderun::commands::{CommandLine, CommandSequence};
use graderun::config::Limits;
use graderun::engine::{run_compile_sequence, run_test_sequence, CompileOutcome};
use graderun::exec::{Executor, TerminationOutcome};

type TestResult = Result<(), Box<dyn Error>>;

fn seq(commands: &[&str]) -> CommandSequence {
    let commands = commands
        .iter()
        .map(|c| CommandLine::new(*c).unwrap())
        .collect();
    CommandSequence::new(commands)
}

fn executor() -> Executor {
    Executor::new(Limits::default())
}

/// Write an executable shell script into `dir` and return its path.
fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf, Box<dyn Error>> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

#[test]
fn empty_compile_sequence_is_success() -> TestResult {
    let outcome = run_compile_sequence(&executor(), &seq(&[]))?;
    assert_eq!(outcome, CompileOutcome::Success);
    Ok(())
}

#[test]
fn empty_test_sequence_passes_zero() -> TestResult {
    let passed = run_test_sequence(&executor(), &seq(&[]))?;
    assert_eq!(passed, 0);
    Ok(())
}

#[test]
fn compile_stops_at_the_first_failure() -> TestResult {
    let dir = tempdir()?;
    let marker = dir.path().join("marker");
    let touch = format!("touch {}", marker.display());

    let outcome = run_compile_sequence(&executor(), &seq(&["true", "false", touch.as_str()]))?;

    assert_eq!(outcome, CompileOutcome::Failure);
    assert!(!marker.exists(), "command after the failure must not run");

    Ok(())
}

#[test]
fn compile_runs_everything_when_all_succeed() -> TestResult {
    let dir = tempdir()?;
    let marker = dir.path().join("marker");
    let touch = format!("touch {}", marker.display());

    let outcome = run_compile_sequence(&executor(), &seq(&["true", touch.as_str()]))?;

    assert_eq!(outcome, CompileOutcome::Success);
    assert!(marker.exists());

    Ok(())
}

#[test]
fn test_sequence_runs_every_command_and_counts_passes() -> TestResult {
    let passed = run_test_sequence(&executor(), &seq(&["true", "false", "true"]))?;
    assert_eq!(passed, 2);
    Ok(())
}

#[test]
fn test_sequence_keeps_going_after_failures() -> TestResult {
    let dir = tempdir()?;
    let marker = dir.path().join("marker");
    let touch = format!("touch {}", marker.display());

    let passed = run_test_sequence(&executor(), &seq(&["false", touch.as_str(), "false"]))?;

    assert_eq!(passed, 1);
    assert!(marker.exists(), "commands after a failure must still run");

    Ok(())
}

#[test]
fn missing_program_fails_in_both_phases() -> TestResult {
    let exec = executor();

    let outcome = exec.run_one(&CommandLine::new("this-binary-does-not-exist")?)?;
    assert_eq!(outcome, TerminationOutcome::Exited(127));

    let compile = run_compile_sequence(&exec, &seq(&["this-binary-does-not-exist", "true"]))?;
    assert_eq!(compile, CompileOutcome::Failure);

    let passed = run_test_sequence(&exec, &seq(&["true", "this-binary-does-not-exist", "true"]))?;
    assert_eq!(passed, 2);

    Ok(())
}

#[test]
fn signal_death_is_not_a_pass_and_fails_compilation() -> TestResult {
    let dir = tempdir()?;
    let script = write_script(dir.path(), "die.sh", "kill -9 $$")?;
    let die = script.display().to_string();

    let exec = executor();

    let outcome = exec.run_one(&CommandLine::new(die.as_str())?)?;
    assert_eq!(outcome, TerminationOutcome::Signaled(9));
    assert!(!outcome.passed());

    let compile = run_compile_sequence(&exec, &seq(&[die.as_str(), "true"]))?;
    assert_eq!(compile, CompileOutcome::Failure);

    let passed = run_test_sequence(&exec, &seq(&["true", die.as_str()]))?;
    assert_eq!(passed, 1);

    Ok(())
}

#[test]
fn bounded_wait_kills_a_hung_command() -> TestResult {
    let exec = Executor::new(Limits {
        wait_timeout: Some(Duration::from_millis(200)),
        spawn_attempts: 3,
        spawn_retry_delay: Duration::from_millis(50),
    });

    let start = Instant::now();
    let outcome = exec.run_one(&CommandLine::new("sleep 30")?)?;

    assert!(!outcome.passed());
    assert!(matches!(outcome, TerminationOutcome::Signaled(_)));
    assert!(start.elapsed() < Duration::from_secs(10), "wait must be bounded");

    Ok(())
}

#[test]
fn huge_wait_timeout_degrades_to_an_unbounded_wait() -> TestResult {
    // A timeout too large to form a deadline must not panic; the command
    // just runs to completion as if no timeout were set.
    let exec = Executor::new(Limits {
        wait_timeout: Some(Duration::from_secs(u64::MAX)),
        spawn_attempts: 3,
        spawn_retry_delay: Duration::from_millis(50),
    });

    let outcome = exec.run_one(&CommandLine::new("true")?)?;
    assert_eq!(outcome, TerminationOutcome::Exited(0));

    Ok(())
}

#[test]
fn found_but_not_executable_program_reports_126() -> TestResult {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let script = dir.path().join("not-runnable.sh");
    fs::write(&script, "#!/bin/sh\ntrue\n")?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o644))?;

    let cmd = script.display().to_string();
    let outcome = executor().run_one(&CommandLine::new(cmd)?)?;

    assert_eq!(outcome, TerminationOutcome::Exited(126));
    assert!(!outcome.passed());

    Ok(())
}

#[test]
fn blank_command_cannot_pass() -> TestResult {
    // A command whose tokens are all redirection clauses has no program.
    let dir = tempdir()?;
    let out = dir.path().join("out.txt");
    let cmd = format!("> {}", out.display());

    let outcome = executor().run_one(&CommandLine::new(cmd)?)?;
    assert!(!outcome.passed());

    Ok(())
}
