// src/commands/tokenize.rs

//! Tokenizer for command lines.
//!
//! A command line is split on ASCII whitespace into an ordered vector of
//! owned tokens; the end of the vector is the sentinel. `<` and `>` carry
//! redirection meaning only when they appear as standalone tokens; a
//! glued form like `>out.txt` is an ordinary argument and is passed to the
//! program untouched.

/// Split one command line into its argument-vector form.
///
/// Empty and whitespace-only input yields an empty vector; the executor
/// treats that as a failing command rather than something to run.
pub fn tokenize(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_owned).collect()
}
