//! Persisted user preferences
//!
//! [`Settings`] is the only writer of the theme preference. Changes are saved
//! to `settings.json` in the config directory and published on a
//! `tokio::sync::watch` channel so the render loop picks them up.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to save settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    theme: Theme,
}

/// Owner of the theme preference
#[derive(Debug)]
pub struct Settings {
    /// `None` keeps the preference in memory only
    path: Option<PathBuf>,
    theme_tx: watch::Sender<Theme>,
}

impl Settings {
    /// Loads from the config directory, or keeps settings in memory if there is none
    pub fn load() -> Self {
        match crate::config::config_dir() {
            Some(dir) => Self::load_from(dir.join(SETTINGS_FILE)),
            None => Self::in_memory(Theme::default()),
        }
    }

    /// Loads from `path`; a missing or malformed file means [`Theme::Light`]
    pub fn load_from(path: PathBuf) -> Self {
        let theme = read_theme(&path);
        tracing::debug!(path = %path.display(), theme = theme.label(), "loaded settings");
        let (theme_tx, _) = watch::channel(theme);
        Self {
            path: Some(path),
            theme_tx,
        }
    }

    pub fn in_memory(theme: Theme) -> Self {
        let (theme_tx, _) = watch::channel(theme);
        Self {
            path: None,
            theme_tx,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme_tx.borrow()
    }

    /// Receiver notified on every theme change
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.theme_tx.subscribe()
    }

    /// Publishes `theme` and writes it to disk
    ///
    /// Subscribers see the new theme even when saving fails.
    pub fn set_theme(&self, theme: Theme) -> Result<(), SettingsError> {
        self.theme_tx.send_replace(theme);
        self.save(theme)
    }

    /// Flips the theme and returns the new one
    pub fn toggle_theme(&self) -> Result<Theme, SettingsError> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    fn save(&self, theme: Theme) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&SettingsFile { theme })?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn read_theme(path: &Path) -> Theme {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<SettingsFile>(&content).ok())
        .map(|file| file.theme)
        .unwrap_or_default()
}
