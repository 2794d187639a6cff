//! Environment file loading.

use std::path::Path;

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Load `.env` then `.env.local` from the working directory. Later files
    /// never override variables that are already set.
    pub fn init() -> Self {
        Self::init_in(Path::new("."))
    }

    /// Load `.env` then `.env.local` from `dir`.
    pub fn init_in(dir: &Path) -> Self {
        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(".env.local"));
        Self { _guard: () }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_env_files_never_override_set_variables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "KITWATCH_TEST_DOTENV=from-env\nKITWATCH_TEST_DOTENV_PRESET=from-env\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(".env.local"),
            "KITWATCH_TEST_DOTENV=from-local\nKITWATCH_TEST_DOTENV_LOCAL=from-local\n",
        )
        .unwrap();
        env::set_var("KITWATCH_TEST_DOTENV_PRESET", "shell");

        let _env = Environment::init_in(dir.path());

        assert_eq!(env::var("KITWATCH_TEST_DOTENV").unwrap(), "from-env");
        assert_eq!(env::var("KITWATCH_TEST_DOTENV_LOCAL").unwrap(), "from-local");
        assert_eq!(env::var("KITWATCH_TEST_DOTENV_PRESET").unwrap(), "shell");
    }

    #[test]
    fn test_missing_env_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let _env = Environment::init_in(dir.path());
        assert!(env::var("KITWATCH_TEST_NEVER_SET").is_err());
    }
}
