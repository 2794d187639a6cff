//! kitwatch - watch a file, re-run a command, keep an evidence ledger.
//!
//! Main entry point for the `kitwatch` binary.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;
mod error;

use cli::Cli;
use error::CliError;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    UsageError = 2,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    // Before parsing, so `.env` can supply KITWATCH_CONFIG.
    kitwatch_common_config::Environment::init();

    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("kitwatch: {}", e.report());
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    // One logical flow of control; pipelines interleave at await points.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        let config = cli.load_config()?;
        cli.execute(config).await
    })
}

fn init_tracing(cli: &Cli) {
    use kitwatch_common_log::{LogConfig, LogLevel};

    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config = config.with_level(LogLevel::from_verbosity(cli.verbose, cli.quiet));
    }

    if let Err(e) = kitwatch_common_log::init(config) {
        eprintln!("kitwatch: logging disabled: {e}");
    }
}
