//! Error types shared by the kitwatch crates.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for kitwatch filesystem plumbing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error tied to a specific path.
    #[error("{message}: {}", path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn file_system(message: impl Into<String>, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Underlying I/O error kind.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::Io(e) => e.kind(),
            Self::FileSystem { source, .. } => source.kind(),
        }
    }

    /// Whether the failure was a create-new collision.
    pub fn is_already_exists(&self) -> bool {
        self.io_kind() == io::ErrorKind::AlreadyExists
    }

    /// Whether the failure was a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == io::ErrorKind::NotFound
    }
}

/// Result type alias using kitwatch's Error.
pub type Result<T> = std::result::Result<T, Error>;
