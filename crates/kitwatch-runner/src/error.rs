//! Runner error types.

use thiserror::Error;

/// Errors raised while preparing a command.
///
/// Running a command never fails with this type: spawn failures and
/// non-zero exits are both represented inside a [`crate::RunResult`].
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("command is empty")]
    EmptyCommand,

    #[error("cannot parse command `{line}`: {message}")]
    InvalidCommand { line: String, message: String },
}
