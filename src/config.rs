//! Configuration management for finwatch
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/finwatch/config.toml

use crate::push::AuthorizationStatus;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback host for the finance API
pub const DEFAULT_BASE_URL: &str = "https://api.yourservice.com";

/// Fallback host for the low-balance notification endpoint
pub const DEFAULT_NOTIFY_URL: &str = "http://localhost:3000";

/// Environment variable overriding `api.base_url`
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Environment variable overriding `api.notify_url`
pub const NOTIFY_URL_ENV: &str = "NOTIFY_BASE_URL";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub api: ApiConfig,
    pub push: PushConfig,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("finwatch");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save config to an explicit location
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Endpoints of the remote services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Host of `/notify-low-balance`, independent of `base_url`
    pub notify_url: String,
    /// Request timeout; the HTTP client default applies when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            notify_url: DEFAULT_NOTIFY_URL.into(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Replace URLs with the given overrides, skipping empty values
    pub fn with_overrides(mut self, base_url: Option<String>, notify_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(url) = notify_url.filter(|u| !u.trim().is_empty()) {
            self.notify_url = url;
        }
        self
    }

    /// Apply `API_BASE_URL` and `NOTIFY_BASE_URL` from the environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(NOTIFY_URL_ENV).ok(),
        )
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn notify_url(&self) -> &str {
        self.notify_url.trim().trim_end_matches('/')
    }
}

/// Push messaging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Status returned when the app asks for notification permission
    pub permission: AuthorizationStatus,
    /// Fixed device token; a random one is issued per session when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            permission: AuthorizationStatus::Authorized,
            device_token: None,
        }
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Gruvbox,
        }
    }
}
