// src/main.rs

use graderun::{cli, logging, run};

fn main() {
    match run_main() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("graderun error: {err:?}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(true)` when the run completed with a successful compile
/// phase, `Ok(false)` on compile failure, `Err` on fatal errors.
fn run_main() -> anyhow::Result<bool> {
    let args = cli::parse();
    let dry_run = args.dry_run;
    logging::init_logging(args.log_level)?;

    let summary = run(args)?;
    if dry_run {
        return Ok(true);
    }

    if summary.compile.is_success() {
        println!("compilation succeeded");
        println!("passed {}/{} tests", summary.tests_passed, summary.tests_total);
        Ok(true)
    } else {
        println!("compilation failed, tests skipped");
        Ok(false)
    }
}
