//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use kitwatch_common_config::{ConfigLoader, KitwatchConfig};

use crate::commands::{AppendCommand, RunCommand, WatchCommand};
use crate::error::CliError;

/// kitwatch - re-run a command on every settled save and log the evidence
///
/// Each run's combined output is kept in a timestamped log file and
/// summarised as one row of an append-only Markdown ledger.
#[derive(Debug, Parser)]
#[command(
    name = "kitwatch",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error diagnostics"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "KITWATCH_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run once, then re-run after every settled change of the watched file
    Watch(WatchCommand),

    /// Run once and record the result, without watching
    Run(RunCommand),

    /// Append one ledger row for an existing run log
    Append(AppendCommand),
}

impl Cli {
    /// Load configuration from `--config` or `.kitwatch/config.yaml`
    pub fn load_config(&self) -> Result<KitwatchConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        tracing::debug!(path = %loader.config_path().display(), "loading configuration");
        Ok(loader.load()?)
    }

    /// Execute the selected command
    pub async fn execute(self, config: KitwatchConfig) -> Result<ExitCode, CliError> {
        let ctx = CommandContext { config };

        match self.command {
            Command::Watch(cmd) => cmd.execute(&ctx).await,
            Command::Run(cmd) => cmd.execute(&ctx).await,
            Command::Append(cmd) => cmd.execute(&ctx).await,
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: KitwatchConfig,
}
