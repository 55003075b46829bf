// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - `[lists]` paths, when present, are not empty strings
/// - `spawn_attempts >= 1`
/// - `wait_timeout_secs`, when present, is not zero
///
/// It does **not** check that the list files exist; that happens when the
/// lists are actually read (and is fatal there, per the startup contract).
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_lists(cfg)?;
    validate_limits(cfg)?;
    Ok(())
}

fn validate_lists(cfg: &ConfigFile) -> Result<()> {
    if let Some(compile) = &cfg.lists.compile {
        if compile.trim().is_empty() {
            return Err(anyhow!("[lists].compile must not be an empty path"));
        }
    }
    if let Some(test) = &cfg.lists.test {
        if test.trim().is_empty() {
            return Err(anyhow!("[lists].test must not be an empty path"));
        }
    }
    Ok(())
}

fn validate_limits(cfg: &ConfigFile) -> Result<()> {
    if cfg.limits.spawn_attempts == 0 {
        return Err(anyhow!("[limits].spawn_attempts must be >= 1 (got 0)"));
    }
    if cfg.limits.wait_timeout_secs == Some(0) {
        return Err(anyhow!(
            "[limits].wait_timeout_secs must be >= 1 when set (omit it to wait forever)"
        ));
    }
    Ok(())
}
