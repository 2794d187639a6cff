//! Command execution with combined output capture.
//!
//! [`run`] spawns a [`RunCommand`], collects stdout and stderr into one
//! buffer, waits for the process to exit and returns a [`RunResult`]. It
//! never fails: a process that cannot be started produces a result with
//! [`ExitStatus::Unknown`] whose output explains why.

mod command;
mod error;
mod result;

pub use command::RunCommand;
pub use error::RunnerError;
pub use result::{ExitStatus, RunResult};

use kitwatch_common_core::Timestamp;
use std::io;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{ChildStderr, ChildStdout, Command};
use tracing::{debug, instrument, warn};

/// Read size for each pipe.
const READ_CHUNK: usize = 8 * 1024;

/// Execute a command to completion.
///
/// The child gets a null stdin. The future resolves only after the child has
/// been reaped.
///
/// # Example
///
/// ```no_run
/// use kitwatch_runner::{run, RunCommand};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let cmd = RunCommand::parse("echo hello")?;
/// let result = run(&cmd).await;
/// assert!(result.exit.is_success());
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(command = %command))]
pub async fn run(command: &RunCommand) -> RunResult {
    let started_at = Timestamp::now();
    let start = Instant::now();

    let mut cmd = Command::new(command.program());
    cmd.args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!(error = %e, "failed to start command");
            return RunResult {
                exit: ExitStatus::Unknown,
                output: format!("failed to start `{}`: {e}\n", command.program()).into_bytes(),
                started_at,
                duration: start.elapsed(),
                spawn_failed: true,
            };
        }
    };

    let mut output = match collect_combined(child.stdout.take(), child.stderr.take()).await {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "failed to read command output");
            format!("failed to read output: {e}\n").into_bytes()
        }
    };

    let exit = match child.wait().await {
        Ok(status) => ExitStatus::from(status),
        Err(e) => {
            warn!(error = %e, "failed to wait for command");
            output.extend_from_slice(format!("failed to wait for process: {e}\n").as_bytes());
            ExitStatus::Unknown
        }
    };

    let duration = start.elapsed();
    debug!(%exit, bytes = output.len(), ?duration, "command finished");

    RunResult {
        exit,
        output,
        started_at,
        duration,
        spawn_failed: false,
    }
}

/// Drain both pipes into one buffer, appending chunks in the order they
/// arrive.
async fn collect_combined(
    mut stdout: Option<ChildStdout>,
    mut stderr: Option<ChildStderr>,
) -> io::Result<Vec<u8>> {
    let mut combined = Vec::new();
    let mut out_buf = vec![0u8; READ_CHUNK];
    let mut err_buf = vec![0u8; READ_CHUNK];

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => {
                match read? {
                    0 => stdout = None,
                    n => combined.extend_from_slice(&out_buf[..n]),
                }
            }
            read = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => {
                match read? {
                    0 => stderr = None,
                    n => combined.extend_from_slice(&err_buf[..n]),
                }
            }
        }
    }

    Ok(combined)
}

async fn read_chunk<R: AsyncRead + Unpin>(reader: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize> {
    match reader {
        Some(r) => r.read(buf).await,
        None => Ok(0),
    }
}
