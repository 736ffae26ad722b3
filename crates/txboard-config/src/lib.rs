//! Configuration management for txboard
//!
//! This module handles loading, validation, and management of
//! txboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;
use error::ConfigResult;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Which transaction source backs the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process list, optionally seeded from a JSON file
    Memory,
    /// PostgREST-compatible REST endpoint (e.g. Supabase)
    #[serde(alias = "supabase")]
    Postgrest,
}

impl Default for StoreKind {
    fn default() -> Self {
        StoreKind::Memory
    }
}

impl std::str::FromStr for StoreKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "postgrest" | "supabase" => Ok(StoreKind::Postgrest),
            _ => Err(format!("Invalid store kind: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Memory => write!(f, "memory"),
            StoreKind::Postgrest => write!(f, "postgrest"),
        }
    }
}

/// Transaction store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub kind: StoreKind,
    /// Base URL of the REST endpoint (postgrest only)
    #[serde(default)]
    pub url: Option<String>,
    /// API key sent as `apikey` and bearer token (postgrest only)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Table holding the transactions
    #[serde(default = "default_table")]
    pub table: String,
    /// Column holding the owner identifier
    #[serde(default = "default_owner_column")]
    pub owner_column: String,
    /// JSON file with initial transactions (memory only)
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            url: None,
            api_key: None,
            table: default_table(),
            owner_column: default_owner_column(),
            seed_file: None,
        }
    }
}

fn default_table() -> String {
    "transactions".to_string()
}

fn default_owner_column() -> String {
    "user_id".to_string()
}

/// Initial session state
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Owner whose transactions are shown at startup
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Month shown at startup (YYYY-MM); current UTC month when absent
    #[serde(default)]
    pub default_month: Option<String>,
}

/// Display labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Placeholder row text when the month has no transactions
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
    /// Shown in the content column when a transaction has no note
    #[serde(default = "default_no_content_label")]
    pub no_content_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            empty_message: default_empty_message(),
            no_content_label: default_no_content_label(),
        }
    }
}

fn default_empty_message() -> String {
    "No transactions found.".to_string()
}

fn default_no_content_label() -> String {
    "No content".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError {
            path: path.display().to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.store.kind == StoreKind::Postgrest {
            match self.store.url.as_deref() {
                None | Some("") => {
                    return Err(ConfigError::MissingField {
                        field: "store.url".to_string(),
                    });
                }
                Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                    return Err(ConfigError::InvalidValue {
                        field: "store.url".to_string(),
                        reason: "URL must start with http:// or https://".to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        if self.store.table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.table".to_string(),
                reason: "Table name must not be empty".to_string(),
            });
        }

        if let Some(month) = self.session.default_month.as_deref() {
            if !txboard_utils::is_month_key(month) {
                return Err(ConfigError::InvalidValue {
                    field: "session.default_month".to_string(),
                    reason: format!("'{}' is not a YYYY-MM month", month),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.store.table, "transactions");
        assert_eq!(config.store.owner_column, "user_id");
        assert_eq!(config.display.empty_message, "No transactions found.");
        assert_eq!(config.display.no_content_label, "No content");
        assert!(config.session.owner_id.is_none());
    }

    #[test]
    fn test_default_template_is_valid() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8081");
    }

    #[test]
    fn test_postgrest_requires_url() {
        let err = Config::from_yaml("store:\n  kind: postgrest\n").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::MissingField);

        let err = Config::from_yaml("store:\n  kind: postgrest\n  url: example.com\n").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidValue);

        let config = Config::from_yaml(
            "store:\n  kind: postgrest\n  url: https://abc.supabase.co\n  api_key: anon\n",
        )
        .unwrap();
        assert_eq!(config.store.api_key.as_deref(), Some("anon"));
    }

    #[test]
    fn test_rejects_bad_month_and_port() {
        let err = Config::from_yaml("session:\n  default_month: 2024-13\n").unwrap_err();
        assert!(err.to_string().contains("session.default_month"));

        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "session:\n  owner_id: user-1\n  default_month: 2024-03").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.session.owner_id.as_deref(), Some("user-1"));
        assert_eq!(config.session.default_month.as_deref(), Some("2024-03"));

        let err = Config::load("/definitely/not/here.yaml").unwrap_err();
        assert_eq!(err.code(), error::ConfigErrorCode::FileNotFound);
        assert!(!err.to_details().suggestions.is_empty());
    }

    #[test]
    fn test_store_kind_from_str() {
        assert_eq!("supabase".parse::<StoreKind>().unwrap(), StoreKind::Postgrest);
        assert_eq!("Memory".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert!("sqlite".parse::<StoreKind>().is_err());

        let config = Config::from_yaml("store:\n  kind: supabase\n  url: \"https://x.supabase.co\"\n").unwrap();
        assert_eq!(config.store.kind, StoreKind::Postgrest);
    }
}
