//! Configuration management for the reading-list dashboard.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Open Library catalog settings
    pub catalog: CatalogConfig,

    /// Enrichment settings
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Table and export settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output (stderr)
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Open Library catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Open Library base URL
    pub base_url: String,

    /// Owner of the reading list
    pub username: String,

    /// Reading-log shelf (want-to-read, currently-reading, already-read)
    pub shelf: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Maximum retries for failed requests
    pub max_retries: u32,

    /// Retry delay in milliseconds
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds (None = wait indefinitely)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// How a failing entry affects the enrichment batch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// One failing entry discards the whole batch
    #[default]
    Strict,
    /// Failing entries become placeholder records
    Partial,
}

impl std::fmt::Display for JoinPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinPolicy::Strict => write!(f, "strict"),
            JoinPolicy::Partial => write!(f, "partial"),
        }
    }
}

impl std::str::FromStr for JoinPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(JoinPolicy::Strict),
            "partial" => Ok(JoinPolicy::Partial),
            _ => Err(anyhow::anyhow!("Invalid join policy: {}", s)),
        }
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Failure handling for the per-entry join
    #[serde(default)]
    pub join_policy: JoinPolicy,

    /// Maximum entries enriched at once (None = all at once)
    #[serde(default)]
    pub max_concurrent_entries: Option<usize>,
}

/// Table and export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Initial page size (10, 50 or 100)
    pub page_size: usize,

    /// Export directory (relative to data directory or absolute)
    pub export_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            export_dir: "exports".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                root_dir: "data".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: false,
                file: true,
                json_format: false,
            },
            catalog: CatalogConfig {
                base_url: "https://openlibrary.org".to_string(),
                username: "mekBot".to_string(),
                shelf: "want-to-read".to_string(),
                user_agent: "book-dashboard/0.1.0".to_string(),
                max_retries: 0,
                retry_delay_ms: 1000,
                request_timeout_secs: None,
            },
            enrichment: EnrichmentConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get the path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.log_dir)
    }

    /// Get the path for the export directory
    pub fn export_dir(&self) -> PathBuf {
        self.resolve(&self.dashboard.export_dir)
    }

    /// Parsed default log level, falling back to INFO
    pub fn log_level(&self) -> tracing::Level {
        self.logging
            .default_level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir().join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.root_dir, "data");
        assert_eq!(config.catalog.base_url, "https://openlibrary.org");
        assert_eq!(config.catalog.username, "mekBot");
        assert_eq!(config.catalog.max_retries, 0);
        assert_eq!(config.catalog.request_timeout_secs, None);
        assert_eq!(config.enrichment.join_policy, JoinPolicy::Strict);
        assert_eq!(config.enrichment.max_concurrent_entries, None);
        assert_eq!(config.dashboard.page_size, 10);
    }

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut original_config = Config::default();
        original_config.enrichment.join_policy = JoinPolicy::Partial;
        original_config.enrichment.max_concurrent_entries = Some(4);
        original_config.save(&config_path)?;

        assert!(config_path.exists());

        let loaded_config = Config::from_file(&config_path)?;
        assert_eq!(loaded_config.data.root_dir, original_config.data.root_dir);
        assert_eq!(loaded_config.catalog.base_url, original_config.catalog.base_url);
        assert_eq!(loaded_config.enrichment.join_policy, JoinPolicy::Partial);
        assert_eq!(loaded_config.enrichment.max_concurrent_entries, Some(4));

        Ok(())
    }

    #[test]
    fn test_optional_sections_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[data]
root_dir = "/tmp/books"

[logging]
log_dir = "logs"
default_level = "debug"
console = true
file = false
json_format = false

[catalog]
base_url = "http://localhost:8080"
username = "someone"
shelf = "already-read"
user_agent = "test"
max_retries = 2
retry_delay_ms = 10
"#,
        )?;

        let config = Config::from_file(&config_path)?;
        assert_eq!(config.catalog.shelf, "already-read");
        assert_eq!(config.enrichment.join_policy, JoinPolicy::Strict);
        assert_eq!(config.dashboard.page_size, 10);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);

        Ok(())
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../../config.example.toml")).unwrap();
        assert_eq!(config.catalog.shelf, "want-to-read");
        assert_eq!(config.enrichment.join_policy, JoinPolicy::Strict);
        assert_eq!(config.dashboard.export_dir, "exports");
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.data.root_dir, "data");
    }

    #[test]
    fn test_path_resolution() {
        let config = Config::default();
        assert!(config.log_dir().ends_with("data/logs"));
        assert!(config.export_dir().ends_with("data/exports"));
    }

    #[test]
    fn test_join_policy_parse() {
        assert_eq!("partial".parse::<JoinPolicy>().unwrap(), JoinPolicy::Partial);
        assert_eq!(JoinPolicy::Strict.to_string(), "strict");
        assert!("lenient".parse::<JoinPolicy>().is_err());
    }
}
