//! Watch command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kitwatch_common_config::LaneConfig;
use kitwatch_pipeline::{Pipeline, PipelineConfig};
use tracing::info;

use super::{Settings, Tuning};
use crate::cli::CommandContext;
use crate::error::{CliError, WATCH_USAGE};
use crate::Exit;

/// Run once, then re-run after every settled change of the watched file
///
/// Without --file/--run/--log/--label, the lanes listed in the config file
/// are watched together.
#[derive(Debug, Parser)]
pub struct WatchCommand {
    /// File to watch
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Command line to execute on every trigger
    #[arg(long, value_name = "CMD")]
    pub run: Option<String>,

    /// Evidence ledger receiving one row per run
    #[arg(long, value_name = "LEDGER")]
    pub log: Option<PathBuf>,

    /// Label identifying the run in ledger rows
    #[arg(long)]
    pub label: Option<String>,

    #[command(flatten)]
    pub tuning: Tuning,
}

impl WatchCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<ExitCode, CliError> {
        let settings = self.tuning.resolve(&ctx.config);
        let pipelines = self
            .lanes(ctx)?
            .iter()
            .map(|lane| build_pipeline(lane, &settings))
            .collect::<Result<Vec<_>, _>>()?;

        info!(lanes = pipelines.len(), "starting watch");
        kitwatch_pipeline::watch_all(&pipelines).await?;
        Ok(Exit::Success.into())
    }

    /// The lane given on the command line, or the configured lanes when no
    /// lane flag is present.
    fn lanes(&self, ctx: &CommandContext) -> Result<Vec<LaneConfig>, CliError> {
        let given = LaneConfig {
            file: self.file.clone().unwrap_or_default(),
            run: self.run.clone().unwrap_or_default(),
            log: self.log.clone().unwrap_or_default(),
            label: self.label.clone().unwrap_or_default(),
        };
        let any_flag =
            self.file.is_some() || self.run.is_some() || self.log.is_some() || self.label.is_some();

        if !any_flag && !ctx.config.lanes.is_empty() {
            return Ok(ctx.config.lanes.clone());
        }

        let missing = given.missing_fields();
        if !missing.is_empty() {
            let flags: Vec<String> = missing.iter().map(|f| format!("--{f}")).collect();
            return Err(CliError::usage(
                format!("missing required option(s): {}", flags.join(", ")),
                WATCH_USAGE,
            ));
        }
        Ok(vec![given])
    }
}

fn build_pipeline(lane: &LaneConfig, settings: &Settings) -> Result<Pipeline, CliError> {
    let command = kitwatch_runner::RunCommand::parse(&lane.run)?;
    let config = PipelineConfig::new(&lane.file, command, &lane.log, &lane.label)
        .with_logs_dir(&settings.logs_dir)
        .with_debounce(settings.debounce)
        .with_excerpt_lines(settings.excerpt_lines)
        .with_serialize_runs(settings.serialize_runs);
    Ok(Pipeline::new(config)?)
}
