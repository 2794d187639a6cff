//! Command implementations.

mod append;
mod run;
mod watch;

pub use append::AppendCommand;
pub use run::RunCommand;
pub use watch::WatchCommand;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;
use kitwatch_common_config::{KitwatchConfig, MAX_EXCERPT_LINES};

/// Options that override `.kitwatch/config.yaml` for one invocation.
#[derive(Debug, Clone, Default, Args)]
pub struct Tuning {
    /// Quiet window before a change triggers a run, in milliseconds
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Directory receiving one log file per run
    #[arg(long, value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,

    /// Trailing output lines quoted in each ledger row
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..=MAX_EXCERPT_LINES as u64))]
    pub excerpt_lines: Option<u64>,

    /// Allow a run to start while the previous one is still in flight
    #[arg(long)]
    pub no_serialize: bool,
}

/// Effective settings after layering flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub debounce: Duration,
    pub logs_dir: PathBuf,
    pub excerpt_lines: usize,
    pub serialize_runs: bool,
}

impl Tuning {
    pub fn resolve(&self, config: &KitwatchConfig) -> Settings {
        Settings {
            debounce: Duration::from_millis(self.debounce_ms.unwrap_or(config.debounce_ms)),
            logs_dir: self.logs_dir.clone().unwrap_or_else(|| config.logs_dir.clone()),
            excerpt_lines: self
                .excerpt_lines
                .map_or(config.excerpt_lines, |k| k as usize),
            serialize_runs: config.serialize_runs && !self.no_serialize,
        }
    }
}

/// Process status mirroring a child's exit code; unknown or out of range
/// codes become 1.
pub fn child_exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
