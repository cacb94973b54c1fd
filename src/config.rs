//! Configuration for the external comparison tool.
//!
//! Loaded from `~/.config/anydiff/config.toml` (or the platform
//! equivalent). A missing file means defaults; a malformed file is an
//! error rather than a silent fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config validation failed: {message}")]
    Validation { message: String },
}

/// Root configuration container.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,
}

/// The comparison tool to dispatch to.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    /// Executable name or path.
    #[serde(default = "default_command")]
    pub command: String,
    /// Arguments placed before the resolved input.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
        }
    }
}

fn default_command() -> String {
    "diff".to_string()
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/anydiff/config.toml` on Unix/macOS, or the
    /// equivalent on other platforms via `dirs::config_dir()`. Falls
    /// back to the current directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("anydiff").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.command.is_empty() {
            return Err(ConfigError::Validation {
                message: "tool.command must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the effective tool: `--tool` flag beats the `ANYDIFF_TOOL`
    /// environment variable beats the config file.
    ///
    /// An override names a different executable, so the configured args
    /// do not carry over to it.
    pub fn resolve_tool(&self, flag: Option<&str>, env: Option<&str>) -> ToolConfig {
        if let Some(command) = flag.or(env) {
            return ToolConfig {
                command: command.to_string(),
                args: Vec::new(),
            };
        }
        self.tool.clone()
    }
}
