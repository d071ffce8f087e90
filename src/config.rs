//! Application configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, the JSON
//! file in the per-user config directory, the `NASA_API_KEY` environment
//! variable and command-line flags. The last two are resolved by clap and
//! applied through [`AppConfig::apply_startup`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::StartupConfig;
use crate::feeds::{earth, exoplanets, iss, missions, neo, space_weather};
use crate::refresh::RefreshConfig;

/// Key NASA hands out for low-volume anonymous use
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.json";

/// Error types for loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`AppConfig`]
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Base URLs of every feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub iss: String,
    pub neo: String,
    pub exoplanets: String,
    pub epic: String,
    pub epic_archive: String,
    pub donki: String,
    pub rovers: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            iss: iss::ISS_URL.to_string(),
            neo: neo::NEO_FEED_URL.to_string(),
            exoplanets: exoplanets::EXOPLANETS_URL.to_string(),
            epic: earth::EPIC_URL.to_string(),
            epic_archive: earth::EPIC_ARCHIVE_URL.to_string(),
            donki: space_weather::DONKI_URL.to_string(),
            rovers: missions::ROVERS_URL.to_string(),
        }
    }
}

/// Everything the dashboard can be configured with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: String,
    /// Close-approach date shown on the NEO page
    pub neo_date: NaiveDate,
    pub endpoints: Endpoints,
    pub refresh: RefreshConfig,
    /// Where saved Earth images go; the user's download directory when unset
    pub download_dir: Option<PathBuf>,
    /// Keep feed snapshots on disk
    pub cache_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            neo_date: default_neo_date(),
            endpoints: Endpoints::default(),
            refresh: RefreshConfig::default(),
            download_dir: None,
            cache_enabled: true,
        }
    }
}

/// The feed date the dashboard has always shown
pub fn default_neo_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or_default()
}

/// Per-user config directory (`~/.config/orbitx` on Linux)
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orbitx").map(|dirs| dirs.config_dir().to_path_buf())
}

impl AppConfig {
    /// Loads the config file from the config directory
    ///
    /// A missing file yields defaults. An unreadable or malformed file is
    /// logged and also yields defaults, so a bad edit never blocks startup.
    pub fn load() -> Self {
        let Some(dir) = config_dir() else {
            tracing::debug!("no config directory, using defaults");
            return Self::default();
        };

        match Self::load_from(&dir.join(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Loads `path`, treating a missing file as defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies environment and command-line overrides
    pub fn apply_startup(&mut self, startup: &StartupConfig) {
        if let Some(key) = &startup.api_key {
            self.api_key = key.clone();
        }
        if let Some(date) = startup.neo_date {
            self.neo_date = date;
        }
        if startup.no_cache {
            self.cache_enabled = false;
        }
    }

    /// Resolved directory for saved images
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(|| {
                UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
