//! Persisted runtime settings
//!
//! File-backed equivalent of the host key-value store: the last-saved
//! extraction configuration, the page mode, and the scheduler poll
//! interval. Loaded once at startup and rewritten wholesale on every save.

use crate::config::ScrapeConfig;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Smallest accepted poll interval in milliseconds
pub const MIN_INTERVAL_MS: u64 = 1000;

/// Poll interval used when none is stored
pub const DEFAULT_INTERVAL_MS: u64 = 3000;

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "pagesift.json";

/// How the target page behaves between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    /// Content settles after load; one-shot runs suffice
    #[default]
    Static,
    /// Content keeps changing; the scheduler polls on an interval
    Dynamic,
}

impl FromStr for PageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(PageMode::Static),
            "dynamic" => Ok(PageMode::Dynamic),
            other => Err(ConfigError::InvalidPageMode(other.to_string())),
        }
    }
}

/// The persisted settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Last-saved extraction configuration
    #[serde(rename = "scraperConfig", default)]
    pub config: ScrapeConfig,
    /// Page mode driving the scheduler
    #[serde(rename = "pageType", default)]
    pub page_mode: PageMode,
    /// Poll interval for dynamic pages, in milliseconds
    #[serde(rename = "intervalMs", default = "default_interval")]
    pub interval_ms: u64,
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config: ScrapeConfig::default(),
            page_mode: PageMode::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Reject values the scheduler cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms < MIN_INTERVAL_MS {
            return Err(ConfigError::IntervalTooSmall(self.interval_ms).into());
        }
        Ok(())
    }
}

/// File-backed settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store over the given file path. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk. A missing file yields pure defaults; a
    /// present but unreadable file is an error.
    pub fn load(&self) -> Result<Settings> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Malformed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Persist the whole settings document, replacing any previous content.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
