// src/errors.rs

//! Crate-wide error aliases.
//!
//! Currently just a thin re-export of `anyhow`, but it gives the rest of
//! the crate one place to grow more structured error types later.

pub use anyhow::{Error, Result};
