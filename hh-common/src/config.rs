//! Configuration loading and API base URL resolution
//!
//! Base URL priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `HOUSEHOLD_API_URL`
//! 3. TOML config file `api_url`
//! 4. Compiled default `http://localhost:8081`
//!
//! A missing config file is not an error; a malformed one is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8081";
pub const API_URL_ENV: &str = "HOUSEHOLD_API_URL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Backend base URL, without the `/api` prefix
    #[serde(default)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// TOML config plus the file it came from (if any)
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: TomlConfig,
    pub source: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file that must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Load the TOML config
///
/// An explicit path must exist. Without one, the platform locations are
/// searched and defaults are used when nothing is found.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(LoadedConfig {
            config: TomlConfig::from_file(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    match default_config_path() {
        Some(path) => Ok(LoadedConfig {
            config: TomlConfig::from_file(&path)?,
            source: Some(path),
        }),
        None => Ok(LoadedConfig::default()),
    }
}

/// First existing config file among the platform locations
///
/// `~/.config/household/config.toml` (or the platform equivalent), then
/// `/etc/household/config.toml` on Unix.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("household").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/household/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Strip trailing slashes and require an http(s) scheme
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("API URL is empty".to_string()));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(Error::Config(format!(
            "API URL must start with http:// or https://: {}",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

/// Resolve the backend base URL following the priority order above
pub fn resolve_api_url(cli_arg: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    // Priority 1: Command-line argument
    if let Some(url) = cli_arg {
        return normalize_api_url(url);
    }

    // Priority 2: Environment variable
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            return normalize_api_url(&url);
        }
    }

    // Priority 3: TOML config file
    if let Some(url) = toml_config.api_url.as_deref() {
        return normalize_api_url(url);
    }

    // Priority 4: Compiled default
    Ok(DEFAULT_API_URL.to_string())
}

/// Fully resolved client settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ClientConfig {
    pub fn resolve(
        cli_api_url: Option<&str>,
        cli_timeout_secs: Option<u64>,
        toml_config: &TomlConfig,
    ) -> Result<Self> {
        let api_url = resolve_api_url(cli_api_url, toml_config)?;

        let timeout_secs = cli_timeout_secs
            .or(toml_config.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config(
                "request timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: toml_config.logging.level.clone(),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: default_log_level(),
        }
    }
}
