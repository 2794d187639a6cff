//! Span and timing helpers.

use std::path::Path;
use tracing::{debug_span, info_span, Span};

/// Span covering one run→log→append sequence of a pipeline.
pub fn pipeline_span(label: &str, target: &Path) -> Span {
    info_span!("pipeline", label = %label, target = %target.display())
}

/// Span for a write to a ledger or log file.
pub fn file_span(operation: &'static str, path: &Path) -> Span {
    debug_span!("file", op = operation, path = %path.display())
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Time elapsed so far.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }

    /// Complete the timer and record duration.
    pub fn finish(self) -> std::time::Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
        duration
    }
}
