//! Runtime configuration
//!
//! Resolution order, later wins:
//! 1. Built-in defaults
//! 2. JSON config file (optional; a missing file means defaults)
//! 3. Environment: `FITLOG_DATA_DIR`, `HOST`, `PORT`, `FITLOG_CORS_ORIGINS`,
//!    `FITLOG_LOG_FORMAT`, `FITLOG_STORAGE`
//!
//! `main` loads `.env` into the environment before any of this runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;

/// Where the server keeps workouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Append-only record file under `data_dir`
    #[default]
    File,
    /// Process memory, lost on exit
    Memory,
}

impl StorageKind {
    fn parse(s: &str) -> CliResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            other => Err(CliError::config_error(format!(
                "Invalid storage: '{}'. Must be 'file' or 'memory'.",
                other
            ))),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (default: "./fitlog-data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Bind address and CORS
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Log line format (default: "text")
    #[serde(default)]
    pub log_format: LogFormat,

    /// Storage backend for `serve` (default: "file")
    #[serde(default)]
    pub storage: StorageKind,
}

fn default_data_dir() -> String {
    "./fitlog-data".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            server: HttpServerConfig::default(),
            log_format: LogFormat::default(),
            storage: StorageKind::default(),
        }
    }
}

impl Config {
    /// File, then process environment, then validation.
    pub fn resolve(path: &Path) -> CliResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, or defaults if it does not exist
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Overlays values from `lookup`, which maps a variable name to its
    /// value.
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("FITLOG_DATA_DIR") {
            self.data_dir = dir;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CliError::config_error(format!("Invalid PORT: '{}'", port)))?;
        }
        if let Some(origins) = lookup("FITLOG_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(format) = lookup("FITLOG_LOG_FORMAT") {
            self.log_format = format.parse().map_err(CliError::config_error)?;
        }
        if let Some(storage) = lookup("FITLOG_STORAGE") {
            self.storage = StorageKind::parse(&storage)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }
}
