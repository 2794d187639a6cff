//! File system utilities for kitwatch.
//!
//! Everything here is async on top of `tokio::fs` so that file writes are
//! plain await points inside a pipeline run.

use kitwatch_common_core::{Error, Result};
use std::io;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Ensure a directory exists, creating intermediate directories as needed.
pub async fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .await
        .map_err(|e| Error::file_system("failed to create directory", path, e))
}

/// Ensure the parent directory of `path` exists.
pub async fn ensure_parent(path: impl AsRef<Path>) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) => ensure_dir(parent).await,
        None => Ok(()),
    }
}

/// Write `contents` to a file that must not exist yet.
///
/// Fails with an `AlreadyExists` error (see [`Error::is_already_exists`])
/// instead of truncating an existing file.
pub async fn create_new(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| Error::file_system("failed to create file", path, e))?;

    file.write_all(contents)
        .await
        .map_err(|e| Error::file_system("failed to write file", path, e))?;
    file.flush()
        .await
        .map_err(|e| Error::file_system("failed to flush file", path, e))?;

    Ok(())
}

/// Append `contents` to a file in a single write, creating the file and its
/// parent directory if absent.
pub async fn append(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path).await?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| Error::file_system("failed to open for append", path, e))?;

    file.write_all(contents)
        .await
        .map_err(|e| Error::file_system("failed to append", path, e))?;
    file.flush()
        .await
        .map_err(|e| Error::file_system("failed to flush", path, e))?;

    Ok(())
}

/// Read a file as text, replacing invalid UTF-8 sequences.
pub async fn read_lossy(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_system("file not found", path, e),
        _ => Error::file_system("failed to read file", path, e),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether `path` currently exists. Errors other than "not found" count as
/// existing so that a transient permission problem is not mistaken for a
/// deleted file.
pub async fn exists(path: impl AsRef<Path>) -> bool {
    fs::try_exists(path.as_ref()).await.unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_new_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.log");

        create_new(&path, b"first").await.unwrap();
        let err = create_new(&path, b"second").await.unwrap_err();

        assert!(err.is_already_exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_append_creates_parent_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes/deep/ledger.md");

        append(&path, b"one\n").await.unwrap();
        append(&path, b"two\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[tokio::test]
    async fn test_read_lossy_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_lossy(dir.path().join("nope.log")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_lossy_replaces_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.log");
        std::fs::write(&path, [b'o', b'k', 0xff, b'\n']).unwrap();

        let text = read_lossy(&path).await.unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_ensure_dir_and_exists() {
        let dir = tempdir().unwrap();
        let logs = dir.path().join("a/b/logs");

        assert!(!exists(&logs).await);
        ensure_dir(&logs).await.unwrap();
        ensure_dir(&logs).await.unwrap();
        assert!(exists(&logs).await);
    }
}
