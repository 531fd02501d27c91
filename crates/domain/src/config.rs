//! Configuration structures
//!
//! Loaded by the infra config loader from the environment or a JSON/TOML
//! file. Everything except the API base URL has a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig::new(base_url),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fixed base URL every relative path is joined onto
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout_secs: None, user_agent: default_user_agent() }
    }
}

fn default_user_agent() -> String {
    format!("mizan/{}", env!("CARGO_PKG_VERSION"))
}

/// Where the session keys are persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file; `None` means `~/.mizan/storage.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_base_url_is_required() {
        let config: Config =
            serde_json::from_str(r#"{ "api": { "base_url": "https://api.example.com/api" } }"#)
                .unwrap();

        assert_eq!(config.api.timeout_secs, None);
        assert!(config.api.user_agent.starts_with("mizan/"));
        assert_eq!(config.storage.path, None);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn missing_api_section_is_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{ "logging": { "json": true } }"#).is_err());
    }
}
