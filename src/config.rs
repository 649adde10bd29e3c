//! Configuration management for randmovie
//!
//! Handles config file loading and API key management.
//! Config is stored at ~/.config/randmovie/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::ott::{DEFAULT_API_HOST, DEFAULT_BASE_URL};

/// Environment variable holding the RapidAPI key
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Environment variable overriding the RapidAPI host header
pub const API_HOST_ENV: &str = "RAPIDAPI_HOST";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "RANDMOVIE_BASE_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// RapidAPI key sent as `X-RapidAPI-Key`
    pub api_key: Option<String>,
    /// Value of the `X-RapidAPI-Host` header
    pub api_host: Option<String>,
    /// API base URL (scheme and host)
    pub base_url: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/randmovie/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("randmovie").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file, or return default if unreadable
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = std::fs::read_to_string(path) else {
            debug!(path = %path.display(), "no config file");
            return Self::default();
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                Self::default()
            }
        }
    }

    /// Get the API key with fallback chain:
    /// 1. Environment variable RAPIDAPI_KEY
    /// 2. Key from config file
    pub fn get_api_key(&self) -> Option<String> {
        non_empty_env(API_KEY_ENV).or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }

    /// Host header value (env, then config, then the default host)
    pub fn api_host(&self) -> String {
        non_empty_env(API_HOST_ENV)
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
    }

    /// Base URL (env, then config, then the production endpoint)
    pub fn base_url(&self) -> String {
        non_empty_env(BASE_URL_ENV)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
