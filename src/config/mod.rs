//! Configuration loading with precedence handling.
//!
//! Precedence chain, lowest to highest:
//! Defaults → Config File → Environment → CLI arguments.
//! A missing config file is not an error; defaults apply.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permissions, transient I/O).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields optional; unset fields fall back to hardcoded defaults.
/// Corresponds to `~/.config/nexadmin/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to the submissions data file.
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Rows per page in the submissions table.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Seconds between store refresh polls.
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,

    /// Path to the tracing log file.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to the submissions data file, if any source named one.
    pub data_path: Option<PathBuf>,
    /// Rows per page.
    pub page_size: usize,
    /// Interval between store refresh polls.
    pub poll_interval: Duration,
    /// Path to the tracing log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            page_size: 10,
            poll_interval: Duration::from_secs(10),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/nexadmin/nexadmin.log` on Unix-like systems, the
/// platform equivalent elsewhere; current directory as a last resort.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("nexadmin").join("nexadmin.log")
    } else {
        PathBuf::from("nexadmin.log")
    }
}

/// Resolve the default config file path.
///
/// `~/.config/nexadmin/config.toml` on Unix, the platform equivalent
/// elsewhere. `None` when no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nexadmin").join("config.toml"))
}

/// Load a configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist; not an error, defaults
/// are used.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Locate and load the config file.
///
/// Location precedence (highest first): explicit path (CLI `--config`),
/// the `NEXADMIN_CONFIG` environment variable, the default path.
///
/// # Errors
///
/// Returns an error only if a located file cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("NEXADMIN_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file into the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        data_path: config.data_path.or(defaults.data_path),
        page_size: config.page_size.unwrap_or(defaults.page_size).max(1),
        poll_interval: config
            .poll_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_interval),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// `NEXADMIN_DATA` overrides the data file path.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(data) = std::env::var("NEXADMIN_DATA") {
        config.data_path = Some(PathBuf::from(data));
    }

    config
}

/// Apply CLI argument overrides, the highest-precedence source.
///
/// Only overrides the fields the user actually passed.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    data_override: Option<PathBuf>,
    page_size_override: Option<usize>,
    poll_interval_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(data) = data_override {
        config.data_path = Some(data);
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size.max(1);
    }

    if let Some(secs) = poll_interval_override {
        config.poll_interval = Duration::from_secs(secs);
    }

    config
}

// ===== Tests =====

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
