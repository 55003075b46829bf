// src/exec/redirect.rs

//! Redirection planning.
//!
//! One left-to-right pass over the token vector finds `<` / `>` clauses,
//! records the file each stream should be bound to, and builds the final
//! argument vector with those clauses excised, so the program being run
//! never sees them. The pass never mutates the input in place; the final
//! vector is built fresh.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Mode bits for output-redirection targets: owner read/write, nothing
/// for group or world.
pub const OUTPUT_FILE_PERMISSIONS: u32 = 0o600;

/// A command's tokens with the redirection clauses separated out.
///
/// `argv` is what the program actually receives; `stdin` / `stdout` are
/// the files (if any) its standard streams should be bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPlan {
    pub argv: Vec<String>,
    pub stdin: Option<PathBuf>,
    pub stdout: Option<PathBuf>,
}

/// Scan a token vector once, left to right, and build a [`RedirectPlan`].
///
/// The first `<` clause binds stdin and the first `>` clause binds stdout;
/// each consumes its operator and the following filename token. A later
/// occurrence of an already-bound operator is not a clause; the scan
/// continues and both tokens stay in `argv` as ordinary arguments.
///
/// An operator as the final token has no filename to consume; that is an
/// error, which the executor turns into a failure of this one command.
pub fn plan_redirections(tokens: Vec<String>) -> Result<RedirectPlan> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut stdin = None;
    let mut stdout = None;

    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        let slot = match token.as_str() {
            "<" if stdin.is_none() => &mut stdin,
            ">" if stdout.is_none() => &mut stdout,
            _ => {
                argv.push(token);
                continue;
            }
        };

        match iter.next() {
            Some(path) => *slot = Some(PathBuf::from(path)),
            None => {
                return Err(anyhow!(
                    "redirection operator {:?} is not followed by a file name",
                    token
                ))
            }
        }
    }

    Ok(RedirectPlan { argv, stdin, stdout })
}

/// Open an input-redirection target, read-only.
pub fn open_input(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Open an output-redirection target: write-only, created if absent,
/// truncated if present, with [`OUTPUT_FILE_PERMISSIONS`].
pub fn open_output(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_FILE_PERMISSIONS);
    }

    options.open(path)
}
