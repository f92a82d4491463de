//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: backend
//! address, where the session credential is kept, an optional request
//! timeout and the last email used to log in.
//!
//! Configuration is stored at `~/.config/wellness-client/config.json`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::auth::{FileTokenStore, KeyringTokenStore, Session, TokenStore};

/// Application name used for config/data directory paths
const APP_NAME: &str = "wellness-client";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the backend address
pub const API_URL_ENV: &str = "WELLNESS_API_URL";

/// Where the session credential is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// `session.json` in the data directory
    #[default]
    File,
    /// OS keychain
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub token_backend: TokenBackend,
    /// No client-side deadline when absent
    pub request_timeout_secs: Option<u64>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Backend address: explicit override, then config file, then the hosted default.
    pub fn base_url(&self, override_url: Option<&str>) -> String {
        override_url
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Open the session context for the configured backend.
    pub fn open_session(&self) -> Result<Session> {
        let store: Arc<dyn TokenStore> = match self.token_backend {
            TokenBackend::File => Arc::new(FileTokenStore::new(self.data_dir()?)),
            TokenBackend::Keyring => Arc::new(KeyringTokenStore::new()),
        };
        Ok(Session::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.token_backend, TokenBackend::File);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_precedence() {
        let config = Config {
            api_base_url: Some("http://localhost:5000/api".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url(None), "http://localhost:5000/api");
        assert_eq!(config.base_url(Some("http://10.0.0.2/api")), "http://10.0.0.2/api");
        assert_eq!(config.base_url(Some("  ")), "http://localhost:5000/api");
    }

    #[test]
    fn test_token_backend_wire_names() {
        let config: Config = serde_json::from_str(r#"{"token_backend": "keyring", "request_timeout_secs": 0}"#).unwrap();
        assert_eq!(config.token_backend, TokenBackend::Keyring);
        // Zero means no deadline
        assert_eq!(config.request_timeout(), None);
    }
}
