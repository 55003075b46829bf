// src/engine/mod.rs

//! Sequence-running policies.
//!
//! The engine drives the executor over the two command sequences and
//! folds the per-command outcomes into the aggregate each phase reports:
//! - compile: stop on the first failure, report Success/Failure
//! - test: run everything, report how many passed

pub mod runner;

pub use runner::{run_compile_sequence, run_test_sequence, CompileOutcome, RunSummary};
