//! Application settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Directory scanned for capture files
    #[serde(default = "default_capture_dir")]
    pub capture_dir: PathBuf,
    /// Working directory created at startup
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Trigger-check cadence in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_capture_dir() -> PathBuf {
    data_dir().join("captures")
}

fn default_work_dir() -> PathBuf {
    data_dir().join("work")
}

fn default_tick_interval_ms() -> u64 {
    250
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("highnoon"))
        .unwrap_or_else(|| PathBuf::from("highnoon"))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capture_dir: default_capture_dir(),
            work_dir: default_work_dir(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Settings {
    /// Get the XDG config directory for highnoon
    /// Uses $XDG_CONFIG_HOME/highnoon on Linux/macOS, falls back to ~/.config/highnoon
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("highnoon"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("highnoon"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load settings, writing the defaults to disk on first run
    pub fn load_or_init() -> Self {
        let settings = Self::load();
        if let Some(path) = Self::settings_path() {
            if !path.exists() {
                if let Err(e) = settings.save() {
                    tracing::warn!("could not write default settings: {}", e);
                }
            }
        }
        settings
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}
