//! Pipeline error types.

use kitwatch_evidence::EvidenceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a pipeline.
///
/// A failed or unstartable command is not among them: it is recorded as a
/// `#Bug` row and the pipeline carries on.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    #[error("watched file does not exist: {}", .0.display())]
    TargetMissing(PathBuf),

    #[error("watched file was removed: {}", .0.display())]
    TargetRemoved(PathBuf),

    #[error("failed to watch {}: {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("file watcher for {} failed: {message}", path.display())]
    Watch { path: PathBuf, message: String },

    #[error("failed to write run log: {0}")]
    Retention(#[source] kitwatch_common_core::Error),

    #[error(transparent)]
    Evidence(#[from] EvidenceError),

    #[error("failed to write to stdout: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Whether the error came from the change notification side rather than
    /// from recording a run.
    pub fn is_watch_failure(&self) -> bool {
        matches!(
            self,
            Self::TargetMissing(_) | Self::TargetRemoved(_) | Self::Subscribe { .. } | Self::Watch { .. }
        )
    }
}
