use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{QuidError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Where exported spreadsheets land.
    pub export_dir: String,
    /// Show the startup splash. `--no-splash` overrides per run.
    #[serde(default = "default_splash")]
    pub splash: bool,
}

fn default_splash() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir().to_string_lossy().to_string(),
            splash: default_splash(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("quid")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_export_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("quid")
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable. Settings never gate a session — worst case the export lands
/// in the default directory.
pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| QuidError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}
