//! Evidence ledger for kitwatch runs.
//!
//! Every run becomes one row appended to a Markdown ledger. The row carries
//! the calendar date, the lane label, a `#Confirmed`/`#Bug` tag derived from
//! the exit status and a short excerpt of the run's log.

mod error;
mod excerpt;
mod ledger;
mod row;
mod status;

pub use error::EvidenceError;
pub use excerpt::{excerpt_file, excerpt_text, EXCERPT_SEPARATOR, NO_LOG_PLACEHOLDER};
pub use ledger::Ledger;
pub use row::{EvidenceRow, BASE_TAGS, LABEL_SUFFIX, SOURCE_TYPE};
pub use status::StatusTag;

pub use kitwatch_common_core::DEFAULT_EXCERPT_LINES;

use kitwatch_common_core::Timestamp;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Builds rows from run logs and appends them to a ledger.
#[derive(Debug, Clone)]
pub struct EvidenceLogger {
    ledger: Ledger,
    excerpt_lines: usize,
    echo: bool,
}

impl EvidenceLogger {
    /// Logger writing to `ledger`, echoing each row to stdout.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            excerpt_lines: DEFAULT_EXCERPT_LINES,
            echo: true,
        }
    }

    /// Quote `lines` log lines per row instead of the default.
    pub fn with_excerpt_lines(mut self, lines: usize) -> Self {
        self.excerpt_lines = lines;
        self
    }

    /// Whether appended rows are also printed to stdout.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Build a row for `label` from `status` and the log at `input`.
    ///
    /// The log is read, never modified. A missing log yields a row quoting
    /// [`NO_LOG_PLACEHOLDER`].
    pub async fn build_row(&self, label: &str, status: &str, input: &Path) -> EvidenceRow {
        EvidenceRow {
            date: Timestamp::now().calendar_date(),
            label: label.to_string(),
            status: StatusTag::from_status(status),
            excerpt: excerpt_file(input, self.excerpt_lines).await,
        }
    }

    /// Append one row for a finished run and return it.
    ///
    /// Only a ledger write failure is an error. The row is echoed after it
    /// has been appended.
    #[instrument(skip(self), fields(ledger = %self.ledger.path().display()))]
    pub async fn record(
        &self,
        label: &str,
        status: &str,
        input: &Path,
    ) -> Result<EvidenceRow, EvidenceError> {
        let row = self.build_row(label, status, input).await;
        self.ledger.append(&row).await?;
        info!(status = %row.status, "evidence recorded");

        if self.echo {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(row.render().as_bytes())?;
            stdout.flush()?;
        }
        Ok(row)
    }
}
