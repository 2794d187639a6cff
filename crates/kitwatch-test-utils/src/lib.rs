//! Test utilities for kitwatch crates.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// A throwaway kit: a watched target, a ledger and a logs directory inside
/// one temporary directory.
pub struct TempKit {
    dir: TempDir,
}

impl TempKit {
    /// New kit whose target file `target.txt` already exists.
    pub fn new() -> Self {
        let kit = Self { dir: temp_dir() };
        std::fs::write(kit.target(), "initial\n").expect("Failed to create target");
        kit
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn target(&self) -> PathBuf {
        self.path().join("target.txt")
    }

    pub fn ledger(&self) -> PathBuf {
        self.path().join("notes").join("ledger.md")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.path().join("logs")
    }

    /// Overwrite the target, as an editor save would.
    pub fn save_target(&self, contents: &str) {
        std::fs::write(self.target(), contents).expect("Failed to write target");
    }

    /// Rows currently in the ledger (lines starting with `|`).
    pub fn ledger_rows(&self) -> Vec<String> {
        match std::fs::read_to_string(self.ledger()) {
            Ok(text) => text
                .lines()
                .filter(|l| l.starts_with('|'))
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Log files in the logs directory, sorted by name.
    pub fn log_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = match std::fs::read_dir(self.logs_dir()) {
            Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
            Err(_) => Vec::new(),
        };
        files.sort();
        files
    }

    /// Poll until the ledger holds at least `count` rows or `timeout` passes.
    pub async fn wait_for_rows(&self, count: usize, timeout: Duration) -> Vec<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let rows = self.ledger_rows();
            if rows.len() >= count || Instant::now() >= deadline {
                return rows;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// Blocking variant of [`wait_for_rows`](Self::wait_for_rows) for
    /// process-level tests.
    pub fn wait_for_rows_blocking(&self, count: usize, timeout: Duration) -> Vec<String> {
        let deadline = Instant::now() + timeout;
        loop {
            let rows = self.ledger_rows();
            if rows.len() >= count || Instant::now() >= deadline {
                return rows;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}

impl Default for TempKit {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
