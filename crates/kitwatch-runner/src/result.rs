//! Run results.

use kitwatch_common_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitStatus {
    /// The process exited with this code.
    Code(i32),
    /// The process could not be started, or ended without a code (killed by
    /// a signal).
    Unknown,
}

impl ExitStatus {
    /// Exactly exit code zero.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Code(0))
    }

    /// The code, if there was one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Unknown => None,
        }
    }

    /// Numeric status for textual interfaces; unknown renders as `1`.
    pub fn status_code(&self) -> i32 {
        self.code().unwrap_or(1)
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        status.code().map_or(Self::Unknown, Self::Code)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of one command invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Exit status.
    pub exit: ExitStatus,
    /// Standard output and standard error, interleaved in arrival order.
    pub output: Vec<u8>,
    /// When the command was spawned.
    pub started_at: Timestamp,
    /// Wall-clock time from spawn to reap.
    pub duration: Duration,
    /// Whether the process never started.
    pub spawn_failed: bool,
}

impl RunResult {
    /// Combined output as text, replacing invalid UTF-8.
    pub fn output_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}
