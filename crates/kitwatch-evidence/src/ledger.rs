//! The append-only evidence ledger file.

use crate::error::EvidenceError;
use crate::row::EvidenceRow;
use kitwatch_common_log::spans::file_span;
use std::path::{Path, PathBuf};
use tracing::{debug, Instrument};

/// An evidence ledger on disk.
///
/// Rows are only ever appended. Each append is a single write on a file
/// opened in append mode; several processes may append to the same ledger
/// without locking.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Ledger at `path`. Nothing is touched until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, creating the file and its parent directory if absent.
    pub async fn append(&self, row: &EvidenceRow) -> Result<(), EvidenceError> {
        let line = row.render();
        kitwatch_common_fs::append(&self.path, line.as_bytes())
            .instrument(file_span("append", &self.path))
            .await
            .map_err(|source| EvidenceError::LedgerWrite {
                path: self.path.clone(),
                source,
            })?;
        debug!(ledger = %self.path.display(), "row appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusTag;
    use tempfile::tempdir;

    fn row(label: &str) -> EvidenceRow {
        EvidenceRow {
            date: "2024-03-07".to_string(),
            label: label.to_string(),
            status: StatusTag::Confirmed,
            excerpt: "ok".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_append_creates_file_without_header() {
        let dir = tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("notes/ledger.md"));

        ledger.append(&row("first")).await.unwrap();

        let text = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(text, row("first").render());
    }

    #[tokio::test]
    async fn test_append_preserves_existing_rows_byte_for_byte() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.md");
        let prior = "# Kit Evidence Log\n\n| Date Added | Source Type | Title / Description | Tags | Notes |\n|---|---|---|---|---|\n| 2024-01-01 | Code | old run | #Code #Experiment #Bug | Output: {x} |\n";
        std::fs::write(&path, prior).unwrap();

        Ledger::new(&path).append(&row("new")).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(prior));
        assert_eq!(&text[prior.len()..], row("new").render());
        assert_eq!(text.lines().count(), prior.lines().count() + 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_whole_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.md");

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let ledger = Ledger::new(&path);
                tokio::spawn(async move { ledger.append(&row(&format!("lane-{i}"))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 16);
        assert!(text.lines().all(|l| l.starts_with("| 2024-03-07 | Code | lane-") && l.ends_with(" |")));
    }

    #[tokio::test]
    async fn test_unwritable_ledger_is_an_error() {
        let dir = tempdir().unwrap();
        // A directory where the ledger file should be.
        let path = dir.path().join("ledger.md");
        std::fs::create_dir(&path).unwrap();

        let err = Ledger::new(&path).append(&row("x")).await.unwrap_err();
        assert!(matches!(err, EvidenceError::LedgerWrite { .. }));
    }
}
