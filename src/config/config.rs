use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_FILE, DEFAULT_DEBOUNCE_MS, DEFAULT_SERVER_URL, SERVER_URL_ENV};
use crate::error::{TalkError, TalkResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server_url: Option<String>,
    /// Default name for comments and new issues.
    pub reporter_name: Option<String>,
    pub debounce_ms: Option<u64>,
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

/// Missing or unreadable files fall back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save_config(config: &Config) -> TalkResult<()> {
    let path = config_path()
        .ok_or_else(|| TalkError::ConfigError("Could not find home directory".to_string()))?;
    save_config_to(&path, config)
}

pub fn save_config_to(path: &Path, config: &Config) -> TalkResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

pub fn get_server_url(config: &Config) -> String {
    // Environment wins over the config file
    if let Ok(url) = env::var(SERVER_URL_ENV) {
        if !url.trim().is_empty() {
            return url.trim().to_string();
        }
    }

    config
        .server_url
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}
