//! CLI error handling.

use std::process::ExitCode;

use thiserror::Error;

use crate::Exit;

/// One-line usage for `kitwatch watch`.
pub const WATCH_USAGE: &str =
    "usage: kitwatch watch --file <path> --run \"<cmd>\" --log <ledger.md> --label <label>";

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Required options missing or contradictory.
    #[error("{message}")]
    Usage { message: String, usage: &'static str },

    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error(transparent)]
    Pipeline(#[from] kitwatch_pipeline::PipelineError),

    #[error(transparent)]
    Evidence(#[from] kitwatch_evidence::EvidenceError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Numeric process status for this error
    pub fn code(&self) -> u8 {
        let exit = match self {
            Self::Usage { .. } | Self::Config { .. } => Exit::UsageError,
            Self::Pipeline(kitwatch_pipeline::PipelineError::InvalidConfig(_)) => Exit::UsageError,
            Self::Pipeline(_) | Self::Evidence(_) | Self::Other(_) => Exit::GeneralError,
        };
        exit as u8
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Usage { usage, .. } => Some(*usage),
            Self::Config { hint, .. } => hint.as_deref(),
            Self::Pipeline(kitwatch_pipeline::PipelineError::InvalidConfig(_)) => Some(WATCH_USAGE),
            _ => None,
        }
    }

    /// Text printed to stderr. Usage errors stay on one line with the usage
    /// string appended; other hints follow on their own line.
    pub fn report(&self) -> String {
        match (self, self.hint()) {
            (Self::Usage { .. }, Some(usage))
            | (Self::Pipeline(kitwatch_pipeline::PipelineError::InvalidConfig(_)), Some(usage)) => {
                format!("{self}; {usage}")
            }
            (_, Some(hint)) => format!("{self}\n{hint}"),
            (_, None) => self.to_string(),
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>, usage: &'static str) -> Self {
        Self::Usage {
            message: message.into(),
            usage,
        }
    }
}

impl From<kitwatch_common_config::ConfigError> for CliError {
    fn from(err: kitwatch_common_config::ConfigError) -> Self {
        Self::Config {
            message: format!("configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some(format!(
                "check {} or the file given with --config",
                kitwatch_common_config::CONFIG_FILE
            )),
        }
    }
}

impl From<kitwatch_runner::RunnerError> for CliError {
    fn from(err: kitwatch_runner::RunnerError) -> Self {
        Self::Config {
            message: format!("invalid --run command: {err}"),
            source: Some(Box::new(err)),
            hint: Some("quote arguments containing spaces, e.g. --run \"python3 'my script.py'\"".into()),
        }
    }
}
