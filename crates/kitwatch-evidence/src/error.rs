//! Evidence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the evidence logger.
///
/// A missing or unreadable run log is not an error (it is replaced by a
/// placeholder excerpt); failing to write the ledger is.
#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("failed to append to ledger {}: {source}", path.display())]
    LedgerWrite {
        path: PathBuf,
        #[source]
        source: kitwatch_common_core::Error,
    },

    #[error("failed to echo ledger row: {0}")]
    Echo(#[from] std::io::Error),
}
