//! Run command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kitwatch_evidence::{EvidenceLogger, Ledger};
use kitwatch_pipeline::{LogRetention, RunSequence};
use tracing::info;

use super::{child_exit_code, Tuning};
use crate::cli::CommandContext;
use crate::error::CliError;

/// Run once and record the result, without watching
///
/// Exits with the command's own exit status (1 when it has none).
#[derive(Debug, Parser)]
pub struct RunCommand {
    /// Command line to execute
    #[arg(long, value_name = "CMD")]
    pub run: String,

    /// Evidence ledger receiving the row
    #[arg(long, value_name = "LEDGER")]
    pub log: PathBuf,

    /// Label identifying the run in the ledger row
    #[arg(long)]
    pub label: String,

    #[command(flatten)]
    pub tuning: Tuning,
}

impl RunCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<ExitCode, CliError> {
        let settings = self.tuning.resolve(&ctx.config);
        let command = kitwatch_runner::RunCommand::parse(&self.run)?;
        let evidence = EvidenceLogger::new(Ledger::new(&self.log))
            .with_excerpt_lines(settings.excerpt_lines);
        let sequence = RunSequence::new(
            command,
            &self.label,
            LogRetention::new(&settings.logs_dir),
            evidence,
        );

        let record = sequence.execute().await?;
        info!(exit = %record.exit, "run finished");
        Ok(child_exit_code(record.exit.status_code()))
    }
}
