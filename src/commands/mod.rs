// src/commands/mod.rs

//! Command lists and their tokenization.
//!
//! - [`store`] reads the two newline-separated command files into ordered,
//!   immutable sequences (compile first, then test).
//! - [`tokenize`] splits one command line into the argument-vector form
//!   the executor consumes.

pub mod store;
pub mod tokenize;

pub use store::{read_commands, CommandLine, CommandSequence, CommandSet, MAX_COMMAND_LEN};
pub use tokenize::tokenize;
