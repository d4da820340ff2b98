//! Read-only preferences.
//!
//! Looked up in `<config dir>/glasscalc/config.json`, then overridden by
//! the `GLASSCALC_THEME` environment variable. Never written back.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::FADE_DURATION;
use crate::theme::ThemeMode;

/// Environment variable selecting the starting theme.
pub const THEME_ENV: &str = "GLASSCALC_THEME";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown theme '{0}', expected 'light' or 'dark'")]
    InvalidTheme(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassConfig {
    /// Theme shown at startup
    pub theme: ThemeMode,
    /// Length of the theme-change fade in milliseconds
    pub fade_ms: u64,
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            fade_ms: (FADE_DURATION * 1000.0) as u64,
        }
    }
}

impl GlassConfig {
    /// Default location of the config file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "glasscalc")
            .map(|p| p.config_dir().join("config.json"))
    }

    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load from the default location and environment. Problems are logged
    /// and fall back to defaults; a missing file is not a problem.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path).unwrap_or_else(|e| {
                log::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        };
        if let Ok(value) = std::env::var(THEME_ENV) {
            config.apply_theme_override(&value);
        }
        config
    }

    /// Apply a theme override string, keeping the current theme if invalid.
    pub fn apply_theme_override(&mut self, value: &str) {
        match value.parse::<ThemeMode>() {
            Ok(theme) => self.theme = theme,
            Err(e) => log::warn!("ignoring {}: {}", THEME_ENV, e),
        }
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}
