// src/exec/mod.rs

//! Process execution layer.
//!
//! This module turns one command line into one child process and its
//! termination outcome:
//!
//! - [`redirect`] scans the token vector for `<` / `>` clauses and builds
//!   the final argument vector plus the stream bindings.
//! - [`process`] owns the [`Executor`], which spawns the child with the
//!   planned streams, waits for it, and classifies how it ended.

pub mod process;
pub mod redirect;

pub use process::{Executor, TerminationOutcome};
pub use redirect::{plan_redirections, RedirectPlan};
