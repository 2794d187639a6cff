//! The kitwatch watch-run-log pipeline.
//!
//! A [`Pipeline`] runs its command once at start, then watches the target
//! file. Change notifications feed a [`Debouncer`]; when a burst settles the
//! [`RunSequence`] executes: the command runs, its combined output goes to a
//! fresh log file via [`LogRetention`], and a row is appended to the
//! evidence ledger.
//!
//! # Example
//!
//! ```no_run
//! use kitwatch_pipeline::{Pipeline, PipelineConfig};
//! use kitwatch_runner::RunCommand;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::new(
//!     "assets/code/sample.mjs",
//!     RunCommand::parse("node assets/code/sample.mjs")?,
//!     "notes/KIT_EvidenceLog.md",
//!     "sample.mjs",
//! );
//! Pipeline::new(config)?.watch().await?;
//! # Ok(())
//! # }
//! ```

pub mod debounce;
mod error;
pub mod pipeline;
pub mod retention;
pub mod sequence;
pub mod watcher;

pub use debounce::Debouncer;
pub use error::PipelineError;
pub use pipeline::{
    watch_all, Pipeline, PipelineConfig, PipelineState, DEFAULT_DEBOUNCE, DEFAULT_LOGS_DIR,
};
pub use retention::{log_file_name, LogRetention};
pub use sequence::{RunRecord, RunSequence};
pub use watcher::{TargetEvent, TargetWatcher};
