//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! where the employee backend lives, an optional request timeout and an
//! optional log directory.
//!
//! Configuration is stored at `~/.config/staffdesk/config.json`; any field
//! can be overridden from the environment (`STAFFDESK_*`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "staffdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Path the backend is mounted under
pub const DEFAULT_API_PATH: &str = "/employeebe";

pub const ENV_SERVER_URL: &str = "STAFFDESK_SERVER_URL";
pub const ENV_API_PATH: &str = "STAFFDESK_API_PATH";
pub const ENV_TIMEOUT_SECS: &str = "STAFFDESK_TIMEOUT_SECS";
pub const ENV_LOG_DIR: &str = "STAFFDESK_LOG_DIR";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_api_path")]
    pub api_path: String,
    /// No timeout unless set; requests wait as long as the transport does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Write logs to daily files here instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_path: default_api_path(),
            request_timeout_secs: None,
            log_dir: None,
        }
    }
}

impl Config {
    /// Load the user's config file (defaults if absent), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_SERVER_URL) {
            self.server_url = url;
        }
        if let Some(path) = get(ENV_API_PATH) {
            self.api_path = path;
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))?;
            self.request_timeout_secs = Some(secs);
        }
        if let Some(dir) = get(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Server URL and API path joined with exactly one slash.
    pub fn api_base_url(&self) -> String {
        let server = self.server_url.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            server.to_string()
        } else {
            format!("{}/{}", server, path)
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
