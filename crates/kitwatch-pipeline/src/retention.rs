//! Per-run log files.

use kitwatch_common_core::{Result, Timestamp};
use kitwatch_common_log::spans::file_span;
use std::path::{Path, PathBuf};
use tracing::{debug, Instrument};

/// Attempts at disambiguating a name before giving up.
const MAX_SUFFIX: u32 = 1000;

/// File name for a run started at `stamp`. The first attempt is
/// `run_YYYYMMDD_HHMMSS.log`; later attempts add `_<n>`.
pub fn log_file_name(stamp: &Timestamp, attempt: u32) -> String {
    match attempt {
        0 => format!("run_{}.log", stamp.log_stamp()),
        n => format!("run_{}_{n}.log", stamp.log_stamp()),
    }
}

/// Writes each run's combined output to a fresh file in one directory.
#[derive(Debug, Clone)]
pub struct LogRetention {
    dir: PathBuf,
}

impl LogRetention {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `output` in a new log file named after `stamp` and return its
    /// path. An existing file is never overwritten: when the name is taken a
    /// numeric suffix is added.
    pub async fn store(&self, output: &[u8], stamp: &Timestamp) -> Result<PathBuf> {
        kitwatch_common_fs::ensure_dir(&self.dir).await?;

        let mut attempt = 0;
        loop {
            let path = self.dir.join(log_file_name(stamp, attempt));
            let written = kitwatch_common_fs::create_new(&path, output)
                .instrument(file_span("create", &path))
                .await;
            match written {
                Ok(()) => {
                    debug!(path = %path.display(), bytes = output.len(), "log file written");
                    return Ok(path);
                }
                Err(e) if e.is_already_exists() && attempt < MAX_SUFFIX => attempt += 1,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_name_has_second_granularity_stamp() {
        let ts = Timestamp::now();
        let name = log_file_name(&ts, 0);
        assert_eq!(name, format!("run_{}.log", ts.log_stamp()));
        assert_eq!(name.len(), "run_YYYYMMDD_HHMMSS.log".len());
        assert_eq!(log_file_name(&ts, 2), format!("run_{}_2.log", ts.log_stamp()));
    }

    #[tokio::test]
    async fn test_store_creates_directory_and_writes_bytes() {
        let dir = tempdir().unwrap();
        let retention = LogRetention::new(dir.path().join("logs"));

        let path = retention.store(b"hello\n", &Timestamp::now()).await.unwrap();

        assert_eq!(path.parent(), Some(retention.dir()));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello\n");
    }

    #[tokio::test]
    async fn test_same_second_runs_get_distinct_files() {
        let dir = tempdir().unwrap();
        let retention = LogRetention::new(dir.path());
        let ts = Timestamp::now();

        let first = retention.store(b"one", &ts).await.unwrap();
        let second = retention.store(b"two", &ts).await.unwrap();
        let third = retention.store(b"three", &ts).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap().to_string_lossy(), log_file_name(&ts, 1));
        assert_eq!(third.file_name().unwrap().to_string_lossy(), log_file_name(&ts, 2));
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&second).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_empty_output_still_gets_a_file() {
        let dir = tempdir().unwrap();
        let path = LogRetention::new(dir.path())
            .store(b"", &Timestamp::now())
            .await
            .unwrap();
        assert_eq!(std::fs::metadata(path).unwrap().len(), 0);
    }
}
