// src/commands/store.rs

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Maximum length of a single command line, in characters.
///
/// The command-source contract guarantees no command exceeds this; a
/// longer line in a list file is treated as a corrupt list and fails the
/// whole run at startup.
pub const MAX_COMMAND_LEN: usize = 255;

/// One shell-style invocation, immutable after construction.
///
/// May contain at most one `< file` and one `> file` redirection clause
/// anywhere in its token stream; those are interpreted by the executor,
/// not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    /// Build a command from one list-file line.
    ///
    /// Rejects lines longer than [`MAX_COMMAND_LEN`] characters. Callers
    /// are expected to have stripped the trailing newline already.
    pub fn new(line: impl Into<String>) -> Result<Self> {
        let line = line.into();
        let len = line.chars().count();
        if len > MAX_COMMAND_LEN {
            return Err(anyhow!(
                "command is {len} characters long, max is {MAX_COMMAND_LEN}: {:?}",
                truncate_for_error(&line)
            ));
        }
        Ok(Self(line))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn truncate_for_error(line: &str) -> String {
    line.chars().take(40).collect::<String>() + "..."
}

/// Ordered, immutable-after-construction list of commands for one phase.
///
/// Insertion order is execution order. May be empty: an empty compile
/// sequence is trivially successful, an empty test sequence passes zero
/// tests.
#[derive(Debug, Clone, Default)]
pub struct CommandSequence(Vec<CommandLine>);

impl CommandSequence {
    pub fn new(commands: Vec<CommandLine>) -> Self {
        Self(commands)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandLine> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a CommandLine;
    type IntoIter = std::slice::Iter<'a, CommandLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The two command sequences of one grading run.
#[derive(Debug, Clone)]
pub struct CommandSet {
    pub compile: CommandSequence,
    pub test: CommandSequence,
}

/// Read the compile and test command lists from their files.
///
/// Both files must exist and be readable; anything else is a fatal
/// startup error, surfaced before a single command executes. Lines are
/// newline-separated commands; blank and whitespace-only lines are
/// skipped.
pub fn read_commands(
    compile_path: impl AsRef<Path>,
    test_path: impl AsRef<Path>,
) -> Result<CommandSet> {
    let compile = read_command_file(compile_path.as_ref())
        .context("reading compile command list")?;
    let test = read_command_file(test_path.as_ref()).context("reading test command list")?;
    Ok(CommandSet { compile, test })
}

fn read_command_file(path: &Path) -> Result<CommandSequence> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading command list at {:?}", path))?;

    let mut commands = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let command = CommandLine::new(line)
            .with_context(|| format!("{:?} line {}", path, idx + 1))?;
        commands.push(command);
    }

    Ok(CommandSequence::new(commands))
}
