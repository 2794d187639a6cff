//! Append command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kitwatch_common_config::MAX_EXCERPT_LINES;
use kitwatch_evidence::{EvidenceLogger, Ledger};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::Exit;

/// Append one ledger row for an existing run log
#[derive(Debug, Parser)]
pub struct AppendCommand {
    /// Evidence ledger to append to
    #[arg(long, value_name = "LEDGER")]
    pub log: PathBuf,

    /// Label identifying the run
    #[arg(long)]
    pub label: String,

    /// Exit status of the run; exactly "0" is recorded as #Confirmed
    #[arg(long, allow_hyphen_values = true)]
    pub status: String,

    /// Run log to excerpt
    #[arg(long, value_name = "LOGFILE")]
    pub input: PathBuf,

    /// Trailing output lines quoted in the row
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..=MAX_EXCERPT_LINES as u64))]
    pub excerpt_lines: Option<u64>,
}

impl AppendCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<ExitCode, CliError> {
        let excerpt_lines = self
            .excerpt_lines
            .map_or(ctx.config.excerpt_lines, |k| k as usize);
        EvidenceLogger::new(Ledger::new(&self.log))
            .with_excerpt_lines(excerpt_lines)
            .record(&self.label, &self.status, &self.input)
            .await?;
        Ok(Exit::Success.into())
    }
}
