//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// On-disk locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Refresh behavior
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Team-years processed by `mbp-sync`
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.paths.seasons_dir.as_os_str().is_empty() {
            return Err(AppError::config("paths.seasons_dir is empty"));
        }
        if self.paths.capture_dir.as_os_str().is_empty() {
            return Err(AppError::config("paths.capture_dir is empty"));
        }
        for entry in &self.teams {
            if entry.name.trim().is_empty() {
                return Err(AppError::config("teams entry with empty name"));
            }
            if !(1900..=2100).contains(&entry.year) {
                return Err(AppError::config(format!(
                    "team {} has implausible season year {}",
                    entry.name, entry.year
                )));
            }
        }
        Ok(())
    }
}

/// Directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the per-season team cache
    #[serde(default = "defaults::seasons_dir")]
    pub seasons_dir: PathBuf,

    /// Root of captured raw rows for the replay scraper
    #[serde(default = "defaults::capture_dir")]
    pub capture_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            seasons_dir: defaults::seasons_dir(),
            capture_dir: defaults::capture_dir(),
        }
    }
}

/// Refresh settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Re-fetch an already cached roster on non-forced refreshes
    #[serde(default)]
    pub refetch_roster: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// A team-year to keep fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub year: i32,
}

mod defaults {
    use std::path::PathBuf;

    pub fn seasons_dir() -> PathBuf {
        PathBuf::from("data/raw/seasons")
    }
    pub fn capture_dir() -> PathBuf {
        PathBuf::from("data/raw/captures")
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
