#![cfg(unix)]

use std::error::Error;
use std::fs;

use tempfile::tempdir;

use graderun::commands::{CommandLine, CommandSequence};
use graderun::config::Limits;
use graderun::engine::{run_compile_sequence, CompileOutcome};
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

#[test]
fn output_then_input_redirection_round_trips_through_a_file() -> TestResult {
    let dir = tempdir()?;
    let out = dir.path().join("out.txt");
    let captured = dir.path().join("captured.txt");

    let write = format!("echo hi > {}", out.display());
    let read = format!("cat < {} > {}", out.display(), captured.display());

    let exec = executor();

    let outcome = exec.run_one(&CommandLine::new(write.as_str())?)?;
    assert_eq!(outcome, TerminationOutcome::Exited(0));

    let outcome = exec.run_one(&CommandLine::new(read.as_str())?)?;
    assert_eq!(outcome, TerminationOutcome::Exited(0));

    // The redirection clauses reached neither echo nor cat as arguments,
    // and the rebinding carried the bytes through both files.
    assert_eq!(fs::read_to_string(&captured)?, "hi\n");

    Ok(())
}

#[test]
fn output_redirection_truncates_an_existing_file() -> TestResult {
    let dir = tempdir()?;
    let out = dir.path().join("out.txt");
    fs::write(&out, "previous contents that should vanish")?;

    let cmd = format!("echo hi > {}", out.display());
    let outcome = executor().run_one(&CommandLine::new(cmd)?)?;

    assert!(outcome.passed());
    assert_eq!(fs::read_to_string(&out)?, "hi\n");

    Ok(())
}

#[test]
fn output_redirection_target_is_owner_read_write_only() -> TestResult {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let out = dir.path().join("out.txt");

    let cmd = format!("echo hi > {}", out.display());
    let outcome = executor().run_one(&CommandLine::new(cmd)?)?;
    assert!(outcome.passed());

    let mode = fs::metadata(&out)?.permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);

    Ok(())
}

#[test]
fn missing_input_redirection_target_fails_only_that_command() -> TestResult {
    let dir = tempdir()?;
    let missing = dir.path().join("no-such-input.txt");

    let cmd = format!("cat < {}", missing.display());
    let outcome = executor().run_one(&CommandLine::new(cmd)?)?;

    assert!(!outcome.passed());

    Ok(())
}

#[test]
fn unwritable_output_target_fails_the_command_and_stops_compilation() -> TestResult {
    let dir = tempdir()?;
    let marker = dir.path().join("marker");
    let touch = format!("touch {}", marker.display());

    // Target inside a directory that does not exist.
    let bad = format!(
        "echo hi > {}",
        dir.path().join("missing-subdir/out.txt").display()
    );

    let outcome = run_compile_sequence(&executor(), &seq(&[bad.as_str(), touch.as_str()]))?;

    assert_eq!(outcome, CompileOutcome::Failure);
    assert!(!marker.exists(), "nothing after the bad redirect may run");

    Ok(())
}

#[test]
fn dangling_operator_fails_the_command() -> TestResult {
    let outcome = executor().run_one(&CommandLine::new("cat <")?)?;
    assert_eq!(outcome, TerminationOutcome::Exited(1));

    Ok(())
}
