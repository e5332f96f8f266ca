//! Server configuration.
//!
//! Values come from an optional TOML file and are then overridden by the
//! process environment. The credential is read here once; nothing else in
//! the workspace looks at `GEMINI_API_KEY`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{TgError, TgResult};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable holding the model credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub host: String,
    pub port: u16,
    /// Directory with the built front-end, served with SPA fallback.
    pub static_dir: Option<PathBuf>,
    /// Transport timeout for the provider call. Unset means none.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional file, then apply the environment.
    pub fn load(path: Option<&Path>) -> TgResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Parse a TOML configuration file.
    pub fn from_file(path: &Path) -> TgResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TgError::configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML configuration text.
    pub fn from_toml(content: &str) -> TgResult<Self> {
        toml::from_str(content)
            .map_err(|e| TgError::configuration(format!("Invalid configuration: {}", e)))
    }

    /// Apply environment overrides using the given lookup.
    pub fn with_env<F>(mut self, lookup: F) -> TgResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup("TRUTHGUARD_MODEL") {
            self.model = model;
        }
        if let Some(base) = lookup("TRUTHGUARD_API_BASE") {
            self.api_base = base;
        }
        if let Some(host) = lookup("TRUTHGUARD_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| TgError::configuration(format!("Invalid PORT: {}", port)))?;
        }
        if let Some(dir) = lookup("TRUTHGUARD_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(dir));
        }

        debug!(
            model = %self.model,
            port = self.port,
            has_api_key = self.api_key.is_some(),
            "Configuration loaded"
        );
        Ok(self)
    }

    /// The model credential, or a configuration error if it is absent.
    pub fn credential(&self) -> TgResult<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(TgError::configuration(format!("Missing {}", API_KEY_ENV))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.port, 8080);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ServerConfig::from_toml("model = \"gemini-pro\"\nport = 3000\n")
            .unwrap()
            .with_env(env(&[("PORT", "9090"), ("GEMINI_API_KEY", "secret")]))
            .unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.port, 9090);
        assert_eq!(config.credential().unwrap(), "secret");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::default()
            .with_env(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_credential() {
        let err = ServerConfig::default().credential().unwrap_err();
        assert_eq!(err.to_string(), "Missing GEMINI_API_KEY");

        let config = ServerConfig {
            api_key: Some("  ".to_string()),
            ..ServerConfig::default()
        };
        assert!(config.credential().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ServerConfig::from_toml("port = \"not a number\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
