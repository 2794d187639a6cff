//! Configuration file loading and parsing.

use crate::types::{KitwatchConfig, MAX_EXCERPT_LINES};
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file location relative to the project directory.
pub const CONFIG_FILE: &str = ".kitwatch/config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    config_path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Create a loader for `.kitwatch/config.yaml` under the given project
    /// directory. A missing file yields the defaults.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_dir.as_ref().join(CONFIG_FILE),
            required: false,
        }
    }

    /// Create a loader for an explicit config file, which must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Path this loader reads.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<KitwatchConfig, ConfigError> {
        if !self.config_path.exists() {
            if self.required {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            return Ok(KitwatchConfig::default());
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        let config = Self::parse(&contents)?;
        validate(&config)?;
        Ok(config)
    }

    /// Parse YAML text after environment expansion.
    pub fn parse(contents: &str) -> Result<KitwatchConfig, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| ConfigError::ParseError {
        line: None,
        message: e.to_string(),
    })?;

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result = result.replace(full_match.as_str(), &value);
    }

    Ok(result)
}

/// Validate configuration values.
pub fn validate(config: &KitwatchConfig) -> Result<(), ConfigError> {
    if config.debounce_ms == 0 {
        return Err(ConfigError::ValidationError {
            message: "debounce_ms must be greater than 0".to_string(),
        });
    }

    if config.excerpt_lines == 0 || config.excerpt_lines > MAX_EXCERPT_LINES {
        return Err(ConfigError::ValidationError {
            message: format!("excerpt_lines must be between 1 and {MAX_EXCERPT_LINES}"),
        });
    }

    for (index, lane) in config.lanes.iter().enumerate() {
        let missing = lane.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::ValidationError {
                message: format!("lanes[{index}] is missing {}", missing.join(", ")),
            });
        }
    }

    Ok(())
}
