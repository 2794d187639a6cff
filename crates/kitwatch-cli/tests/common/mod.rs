//! Common test utilities for CLI testing.

use std::path::Path;

use assert_cmd::Command;
use kitwatch_test_utils::TempKit;

/// Test context around a temporary kit directory
pub struct TestContext {
    pub kit: TempKit,
}

impl TestContext {
    pub fn new() -> Self {
        Self { kit: TempKit::new() }
    }

    /// Write `.kitwatch/config.yaml` inside the kit
    pub fn with_config(self, config: &str) -> Self {
        let dir = self.path().join(".kitwatch");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.yaml"), config).expect("Failed to write config");
        self
    }

    /// Get path to the kit directory
    pub fn path(&self) -> &Path {
        self.kit.path()
    }

    /// Create a command running inside the kit directory
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("kitwatch").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("KITWATCH_CONFIG")
            .env_remove("RUST_LOG")
            .env("KITWATCH_LOG_LEVEL", "warn");
        cmd
    }

    /// Same as [`command`](Self::command), as a std process for long-running runs
    pub fn std_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("kitwatch"));
        cmd.current_dir(self.path())
            .env_remove("KITWATCH_CONFIG")
            .env_remove("RUST_LOG")
            .env("KITWATCH_LOG_LEVEL", "warn");
        cmd
    }
}
