//! Configuration types for kitwatch.
//!
//! This crate provides the configuration read from `.kitwatch/config.yaml`
//! and the environment. Command line flags are layered on top by the CLI.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
