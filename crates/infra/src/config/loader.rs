//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the base URL is not set there, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MIZAN_API_BASE_URL`: Backend base URL (required)
//! - `MIZAN_API_TIMEOUT_SECS`: Per-request timeout in seconds (default: none)
//! - `MIZAN_API_USER_AGENT`: `User-Agent` header value
//! - `MIZAN_STORAGE_PATH`: Session storage file
//! - `MIZAN_LOG_LEVEL`: Default tracing directive when `RUST_LOG` is unset
//! - `MIZAN_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./mizan.json` or `./mizan.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use mizan_domain::{ApiConfig, Config, LoggingConfig, MizanError, Result, StorageConfig};

/// Load configuration with automatic fallback strategy
///
/// Environment variables win whenever `MIZAN_API_BASE_URL` is set; only
/// when it is unset or blank does loading fall back to a config file.
///
/// # Errors
/// Returns `MizanError::Config` if:
/// - An environment value does not parse (no file fallback in that case)
/// - No config file is found when the base URL is not in the environment
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    if env_opt("MIZAN_API_BASE_URL").is_none() {
        tracing::debug!("MIZAN_API_BASE_URL not set, trying config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `MIZAN_API_BASE_URL` is required; everything else falls back to the
/// [`Config`] defaults.
///
/// # Errors
/// Returns `MizanError::Config` if the base URL is missing or a value does
/// not parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("MIZAN_API_BASE_URL")?;
    if base_url.trim().is_empty() {
        return Err(MizanError::Config("MIZAN_API_BASE_URL is empty".to_string()));
    }

    let mut api = ApiConfig::new(base_url.trim());
    api.timeout_secs = env_parse::<u64>("MIZAN_API_TIMEOUT_SECS")?;
    if let Some(agent) = env_opt("MIZAN_API_USER_AGENT") {
        api.user_agent = agent;
    }

    let storage = StorageConfig { path: env_opt("MIZAN_STORAGE_PATH").map(PathBuf::from) };

    let mut logging = LoggingConfig::default();
    if let Some(level) = env_opt("MIZAN_LOG_LEVEL") {
        logging.level = level;
    }
    logging.json = env_bool("MIZAN_LOG_JSON", logging.json);

    Ok(Config { api, storage, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `MizanError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MizanError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MizanError::Config(
                "MIZAN_API_BASE_URL is not set and no config file was found in any of the standard locations"
                    .to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MizanError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `MizanError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: Config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MizanError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| MizanError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => return Err(MizanError::Config(format!("Unsupported config format: {}", extension))),
    };

    if config.api.base_url.trim().is_empty() {
        return Err(MizanError::Config("api.base_url is empty".to_string()));
    }
    Ok(config)
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./mizan.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("mizan.json"),
        dir.join("mizan.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `MizanError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| MizanError::Config(format!("Missing required environment variable: {}", key)))
}

/// Optional variable; unset and blank both read as `None`.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| MizanError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 6] = [
        "MIZAN_API_BASE_URL",
        "MIZAN_API_TIMEOUT_SECS",
        "MIZAN_API_USER_AGENT",
        "MIZAN_STORAGE_PATH",
        "MIZAN_LOG_LEVEL",
        "MIZAN_LOG_JSON",
    ];

    fn clear_vars() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("MIZAN_TEST_BOOL_TRUE", "Yes");
        std::env::set_var("MIZAN_TEST_BOOL_FALSE", "off");

        assert!(env_bool("MIZAN_TEST_BOOL_TRUE", false));
        assert!(!env_bool("MIZAN_TEST_BOOL_FALSE", true));

        std::env::remove_var("MIZAN_TEST_BOOL_MISSING");
        assert!(env_bool("MIZAN_TEST_BOOL_MISSING", true));
        assert!(!env_bool("MIZAN_TEST_BOOL_MISSING", false));

        std::env::remove_var("MIZAN_TEST_BOOL_TRUE");
        std::env::remove_var("MIZAN_TEST_BOOL_FALSE");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("MIZAN_API_BASE_URL", " https://api.example.com/api ");
        std::env::set_var("MIZAN_API_TIMEOUT_SECS", "15");
        std::env::set_var("MIZAN_API_USER_AGENT", "mizan-test");
        std::env::set_var("MIZAN_STORAGE_PATH", "/tmp/mizan/storage.json");
        std::env::set_var("MIZAN_LOG_LEVEL", "debug");
        std::env::set_var("MIZAN_LOG_JSON", "true");

        let result = load_from_env();
        clear_vars();

        let config = result.expect("config from env");
        assert_eq!(config.api.base_url, "https://api.example.com/api");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.api.user_agent, "mizan-test");
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/mizan/storage.json")));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();
        std::env::set_var("MIZAN_API_BASE_URL", "https://api.example.com/api");

        let result = load_from_env();
        clear_vars();

        let config = result.expect("config from env");
        assert_eq!(config.api.timeout_secs, None);
        assert!(config.api.user_agent.starts_with("mizan/"));
        assert_eq!(config.storage.path, None);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, MizanError::Config(ref m) if m.contains("MIZAN_API_BASE_URL")));
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();
        std::env::set_var("MIZAN_API_BASE_URL", "https://api.example.com/api");
        std::env::set_var("MIZAN_API_TIMEOUT_SECS", "soon");

        let result = load_from_env();
        clear_vars();

        assert!(matches!(result, Err(MizanError::Config(ref m)) if m.contains("MIZAN_API_TIMEOUT_SECS")));
    }

    #[test]
    fn test_load_reports_invalid_env_value_instead_of_probing_files() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();
        std::env::set_var("MIZAN_API_BASE_URL", "https://api.example.com/api");
        std::env::set_var("MIZAN_API_TIMEOUT_SECS", "abc");

        let result = load();
        clear_vars();

        let err = result.unwrap_err();
        assert!(
            matches!(err, MizanError::Config(ref m) if m.contains("MIZAN_API_TIMEOUT_SECS")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "api": { "base_url": "https://api.example.com/api", "timeout_secs": 20 },
                "logging": { "level": "info" }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON file");
        assert_eq!(config.api.base_url, "https://api.example.com/api");
        assert_eq!(config.api.timeout_secs, Some(20));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage, StorageConfig::default());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[api]
base_url = "https://api.example.com/api"

[storage]
path = "/var/lib/mizan/storage.json"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML file");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.storage.path, Some(PathBuf::from("/var/lib/mizan/storage.json")));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(MizanError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = write_temp(r#"{ "this is": "not valid json" "#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_requires_api_section() {
        let result = parse_config(r#"{ "logging": { "json": true } }"#, Path::new("config.json"));
        assert!(matches!(result, Err(MizanError::Config(_))));

        let result =
            parse_config(r#"{ "api": { "base_url": "  " } }"#, Path::new("config.json"));
        assert!(matches!(result, Err(MizanError::Config(ref m)) if m.contains("base_url")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
