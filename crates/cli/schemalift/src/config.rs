//! Configuration file parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sl_driver::OutputFormat;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "schemalift.toml";

/// Tool configuration (`schemalift.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Schema output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Lowering settings
    #[serde(default)]
    pub lower: LowerConfig,

    /// Test-execution service settings
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Schema output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Serialized form of written schemas
    #[serde(default)]
    pub format: OutputFormat,
}

/// Lowering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LowerConfig {
    /// Lower several files on all cores
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Treat any diagnostic as a failure
    #[serde(default)]
    pub deny_warnings: bool,
}

impl Default for LowerConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            deny_warnings: false,
        }
    }
}

fn default_parallel() -> bool {
    true
}

/// Test-execution service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Service base URL
    #[serde(default = "default_runner_url")]
    pub url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            url: default_runner_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_runner_url() -> String {
    sl_runner::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find configuration in a directory, if there is any
    pub fn find_in_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Ok(None);
        }
        Self::from_file(&config_path).map(Some)
    }

    /// Load the explicit file if given, else look in `dir`, else defaults
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::find_in_dir(dir)?.unwrap_or_default(),
        };
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}
