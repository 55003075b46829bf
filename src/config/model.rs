// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [lists]
/// compile = "compile-commands.txt"
/// test = "test-commands.txt"
///
/// [limits]
/// wait_timeout_secs = 30
/// spawn_attempts = 3
/// spawn_retry_delay_ms = 50
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Default command-list locations from `[lists]`.
    ///
    /// Positional CLI arguments take precedence over these.
    #[serde(default)]
    pub lists: ListsSection,

    /// Executor limits from `[limits]`.
    #[serde(default)]
    pub limits: LimitsSection,
}

/// `[lists]` section: where to find the two command files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListsSection {
    /// Path of the compile command list.
    #[serde(default)]
    pub compile: Option<String>,

    /// Path of the test command list.
    #[serde(default)]
    pub test: Option<String>,
}

/// `[limits]` section: spawn retry policy and the optional bounded wait.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsSection {
    /// If set, a child running longer than this many seconds is killed and
    /// counted as a failure. Absent means wait forever (a hung command
    /// blocks the whole sequence).
    #[serde(default)]
    pub wait_timeout_secs: Option<u64>,

    /// How many times to attempt spawning a child before the run is
    /// aborted. Transient errors (EINTR/EAGAIN-style) are retried up to
    /// this count.
    #[serde(default = "default_spawn_attempts")]
    pub spawn_attempts: u32,

    /// Delay between spawn attempts, in milliseconds.
    #[serde(default = "default_spawn_retry_delay_ms")]
    pub spawn_retry_delay_ms: u64,
}

fn default_spawn_attempts() -> u32 {
    3
}

fn default_spawn_retry_delay_ms() -> u64 {
    50
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            wait_timeout_secs: None,
            spawn_attempts: default_spawn_attempts(),
            spawn_retry_delay_ms: default_spawn_retry_delay_ms(),
        }
    }
}

/// Resolved executor limits, handed to `exec::Executor`.
///
/// This is the in-memory form of [`LimitsSection`], with durations already
/// converted. Tests construct it directly to get sub-second timeouts.
#[derive(Debug, Clone)]
pub struct Limits {
    pub wait_timeout: Option<Duration>,
    pub spawn_attempts: u32,
    pub spawn_retry_delay: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        LimitsSection::default().resolve()
    }
}

impl LimitsSection {
    /// Convert the raw TOML section into resolved [`Limits`].
    pub fn resolve(&self) -> Limits {
        Limits {
            wait_timeout: self.wait_timeout_secs.map(Duration::from_secs),
            spawn_attempts: self.spawn_attempts.max(1),
            spawn_retry_delay: Duration::from_millis(self.spawn_retry_delay_ms),
        }
    }
}
