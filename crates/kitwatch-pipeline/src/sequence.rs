//! The run→log→append sequence.

use crate::error::PipelineError;
use crate::retention::LogRetention;
use kitwatch_common_log::spans::Timer;
use kitwatch_evidence::{EvidenceLogger, EvidenceRow};
use kitwatch_runner::{ExitStatus, RunCommand};
use std::path::PathBuf;
use tracing::info;

/// Outcome of one completed sequence.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub exit: ExitStatus,
    pub log_file: PathBuf,
    pub row: EvidenceRow,
}

/// Runs a command, stores its output and appends the ledger row, strictly
/// in that order.
#[derive(Debug, Clone)]
pub struct RunSequence {
    command: RunCommand,
    label: String,
    retention: LogRetention,
    evidence: EvidenceLogger,
}

impl RunSequence {
    pub fn new(
        command: RunCommand,
        label: impl Into<String>,
        retention: LogRetention,
        evidence: EvidenceLogger,
    ) -> Self {
        Self {
            command,
            label: label.into(),
            retention,
            evidence,
        }
    }

    pub fn command(&self) -> &RunCommand {
        &self.command
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Execute once. The log file is named after the moment the command was
    /// spawned, and the row is only appended after that file has been written
    /// in full.
    pub async fn execute(&self) -> Result<RunRecord, PipelineError> {
        let timer = Timer::start("run sequence");

        let result = kitwatch_runner::run(&self.command).await;
        let log_file = self
            .retention
            .store(&result.output, &result.started_at)
            .await
            .map_err(PipelineError::Retention)?;

        let status = result.exit.status_code().to_string();
        let row = self.evidence.record(&self.label, &status, &log_file).await?;

        info!(
            exit = %result.exit,
            log_file = %log_file.display(),
            duration_ms = result.duration.as_millis() as u64,
            "run recorded"
        );
        timer.finish();

        Ok(RunRecord {
            exit: result.exit,
            log_file,
            row,
        })
    }
}
