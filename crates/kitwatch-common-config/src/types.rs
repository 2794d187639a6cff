//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use kitwatch_common_core::defaults::{DEFAULT_DEBOUNCE_MS, DEFAULT_EXCERPT_LINES, DEFAULT_LOGS_DIR};

/// Upper bound on `excerpt_lines`; rows are meant to stay one readable line.
pub const MAX_EXCERPT_LINES: usize = 50;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitwatchConfig {
    /// Quiet window in milliseconds.
    pub debounce_ms: u64,
    /// Directory receiving one log file per run.
    pub logs_dir: PathBuf,
    /// Number of trailing non-empty output lines quoted in each ledger row.
    pub excerpt_lines: usize,
    /// Serialize run→log→append sequences per watched target.
    pub serialize_runs: bool,
    /// Watch lanes started when no lane is given on the command line.
    pub lanes: Vec<LaneConfig>,
}

impl Default for KitwatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            excerpt_lines: DEFAULT_EXCERPT_LINES,
            serialize_runs: true,
            lanes: Vec::new(),
        }
    }
}

/// One watched target and what to do when it settles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// File under observation.
    pub file: PathBuf,
    /// Command line executed on every trigger.
    pub run: String,
    /// Evidence ledger receiving one row per run.
    pub log: PathBuf,
    /// Label identifying the run in ledger rows.
    pub label: String,
}

impl LaneConfig {
    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.file.as_os_str().is_empty() {
            missing.push("file");
        }
        if self.run.trim().is_empty() {
            missing.push("run");
        }
        if self.log.as_os_str().is_empty() {
            missing.push("log");
        }
        if self.label.trim().is_empty() {
            missing.push("label");
        }
        missing
    }
}
