//! kitwatch common core types and utilities.

pub mod defaults;
pub mod error;
pub mod timestamp;

pub use defaults::{DEFAULT_DEBOUNCE_MS, DEFAULT_EXCERPT_LINES, DEFAULT_LOGS_DIR};
pub use error::{Error, Result};
pub use timestamp::Timestamp;
