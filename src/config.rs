//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::Heading;
use crate::pipeline::client::{PipelineClientConfig, DEFAULT_API_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reporting API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Product filter for the last-month query ("All" or unset means none)
    #[serde(default)]
    pub last_month_product: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Longest accepted request timeout (one hour)
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            last_month_product: None,
        }
    }
}

impl BackendConfig {
    /// Client settings derived from this section
    pub fn client_config(&self) -> PipelineClientConfig {
        PipelineClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
            last_month_product: self.last_month_product.clone(),
        }
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins for the JSON routes; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_subtitle")]
    pub subtitle: String,
}

fn default_title() -> String {
    Heading::default().title
}

fn default_subtitle() -> String {
    Heading::default().subtitle
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
        }
    }
}

impl DashboardConfig {
    /// Title block for the renderers
    pub fn heading(&self) -> Heading {
        Heading {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Locations searched when no config file is given, in order
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("revops-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/revops-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first of `paths` that exists.
    ///
    /// A file that exists but cannot be read or parsed is an error; later
    /// locations are not tried.
    pub fn load_first(paths: &[PathBuf]) -> Result<Option<(Self, PathBuf)>, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok(Some((Self::load_with_env(path)?, path.clone()))),
            None => Ok(None),
        }
    }

    /// Load an explicit file if given, otherwise search the default
    /// locations, falling back to defaults with environment overrides.
    ///
    /// Returns the file the config came from, if any. Nothing is logged
    /// here because the subscriber is built from the result.
    pub fn resolve(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = path {
            return Ok((Self::load_with_env(path)?, Some(path.to_path_buf())));
        }

        match Self::load_first(&Self::search_paths())? {
            Some((config, path)) => Ok((config, Some(path))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Check values that would otherwise fail later at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.backend.base_url).map_err(|e| ConfigError::Invalid {
            field: "backend.base_url",
            reason: e.to_string(),
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Invalid {
                field: "backend.base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.backend.request_timeout_secs) {
            return Err(ConfigError::Invalid {
                field: "backend.request_timeout_secs",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_REQUEST_TIMEOUT_SECS, self.backend.request_timeout_secs
                ),
            });
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            });
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Backend overrides
        if let Some(url) = lookup("REVOPS_API_URL") {
            self.backend.base_url = url;
        }

        // Server overrides
        if let Some(host) = lookup("REVOPS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("REVOPS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("REVOPS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("REVOPS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# RevOps Dashboard Configuration
#
# Environment variables override these settings:
# - REVOPS_API_URL
# - REVOPS_HOST
# - REVOPS_PORT
# - REVOPS_LOG_LEVEL
# - REVOPS_LOG_FORMAT

[backend]
# Base URL of the reporting API
base_url = "{base_url}"

# Request timeout in seconds (1 to 3600)
request_timeout_secs = 30

# Only show one product in the last-month report ("All" shows every product)
# last_month_product = "All"

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8084

# Allowed CORS origins for the JSON API (empty allows any origin)
cors_origins = []

[dashboard]
title = "Sage RevOps Dashboard"
subtitle = "Pipeline Analytics & Insights"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        base_url = DEFAULT_API_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, DEFAULT_API_URL);
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.server.addr(), "127.0.0.1:8084");
        assert_eq!(config.dashboard.heading(), Heading::default());
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[backend]
base_url = "http://localhost:9000/api"
last_month_product = "Cloud"

[server]
port = 9090
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:9000/api");
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");

        let client = config.backend.client_config();
        assert_eq!(client.request_timeout_ms, 30_000);
        assert_eq!(client.last_month_product.as_deref(), Some("Cloud"));
    }

    #[test]
    fn test_generated_config_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(generate_default_config().as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.backend.base_url, DEFAULT_API_URL);
        assert_eq!(config.server.port, 8084);
        assert_eq!(config.dashboard.title, "Sage RevOps Dashboard");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let err = Config::load(Path::new("/nonexistent/revops.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("REVOPS_API_URL", "https://staging.example.com/api"),
            ("REVOPS_PORT", "9999"),
            ("REVOPS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.base_url, "https://staging.example.com/api");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "REVOPS_PORT").then(|| "eighty".to_string()));
        assert_eq!(config.server.port, 8084);
    }

    #[test]
    fn test_load_first_takes_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[dashboard]\ntitle = \"First\"\n").unwrap();
        std::fs::write(&second, "[dashboard]\ntitle = \"Second\"\n").unwrap();

        let (config, path) = Config::load_first(&[missing, first.clone(), second])
            .unwrap()
            .unwrap();
        assert_eq!(path, first);
        assert_eq!(config.dashboard.title, "First");
    }

    #[test]
    fn test_load_first_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        let fallback = dir.path().join("fallback.toml");
        std::fs::write(&broken, "[backend\nbase_url = ").unwrap();
        std::fs::write(&fallback, "").unwrap();

        let err = Config::load_first(&[broken, fallback]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let found = Config::load_first(&[dir.path().join("none.toml")]).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\nsubtitle = \"Q3\"").unwrap();

        let (config, source) = Config::resolve(Some(file.path())).unwrap();
        assert_eq!(source.as_deref(), Some(file.path()));
        assert_eq!(config.dashboard.subtitle, "Q3");

        let err = Config::resolve(Some(Path::new("/nonexistent/revops.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_large_timeout_is_rejected_not_overflowed() {
        let mut config = Config::default();
        config.backend.request_timeout_secs = u64::MAX / 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "backend.request_timeout_secs", .. })
        ));
        assert_eq!(config.backend.client_config().request_timeout_ms, u64::MAX);

        config.backend.request_timeout_secs = MAX_REQUEST_TIMEOUT_SECS;
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.client_config().request_timeout_ms, 3_600_000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.backend.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "backend.base_url", .. })
        ));

        let mut config = Config::default();
        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }
}
