//! Defaults shared by the config loader, the evidence logger and the
//! pipeline.

/// Quiet window in milliseconds before a change triggers a run.
pub const DEFAULT_DEBOUNCE_MS: u64 = 150;

/// Trailing non-empty log lines quoted in a ledger row.
pub const DEFAULT_EXCERPT_LINES: usize = 6;

/// Directory receiving one log file per run.
pub const DEFAULT_LOGS_DIR: &str = "logs";
