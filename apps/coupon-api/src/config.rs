//! # Configuration
//!
//! Server and storage settings for the coupon API.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults          0.0.0.0:8080, sqlite, coupons.db, 5 connections  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. TOML file         $COUPON_CONFIG, else ./coupon.toml if present    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Environment       COUPON_BIND_ADDR, COUPON_PORT, COUPON_STORAGE,   │
//! │         │             COUPON_DB_PATH, COUPON_DB_MAX_CONNECTIONS        │
//! │         ▼                                                               │
//! │  4. validate()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! backend = "sqlite"
//! database_path = "coupons.db"
//! max_connections = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "coupon.toml";

// =============================================================================
// Config Types
// =============================================================================

/// Top-level API configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Which coupon store backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: "storage.backend".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Coupon store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_path: PathBuf,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: StorageBackend::Sqlite,
            database_path: PathBuf::from("coupons.db"),
            max_connections: 5,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("COUPON_CONFIG").ok().map(PathBuf::from);
        Self::load_from(path)
    }

    /// Same as [`ApiConfig::load`] with an explicit file path.
    ///
    /// An explicit path must exist. The default `coupon.toml` is optional.
    pub fn load_from(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// Unparseable numbers are errors rather than silently ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("COUPON_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("COUPON_PORT") {
            self.server.port = parse_env("COUPON_PORT", &port)?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(backend) = lookup("COUPON_STORAGE") {
            self.storage.backend = backend.parse()?;
        }

        if let Some(path) = lookup("COUPON_DB_PATH") {
            self.storage.database_path = PathBuf::from(path);
        }

        if let Some(max) = lookup("COUPON_DB_MAX_CONNECTIONS") {
            self.storage.max_connections = parse_env("COUPON_DB_MAX_CONNECTIONS", &max)?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be greater than 0".into()));
        }

        if self.storage.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "storage.max_connections must be greater than 0".into(),
            ));
        }

        if self.storage.backend == StorageBackend::Sqlite
            && self.storage.database_path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(
                "storage.database_path is required for the sqlite backend".into(),
            ));
        }

        if self.storage.backend == StorageBackend::Memory {
            warn!("Memory storage selected: coupons are lost on restart");
        }

        Ok(())
    }

    /// Returns `bind_addr:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.database_path, PathBuf::from("coupons.db"));
        assert_eq!(config.storage.max_connections, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ApiConfig::from_toml(
            r#"
            [server]
            port = 9000

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.max_connections, 5);
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = ApiConfig::from_toml("[server]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config
            .apply_env_overrides(env(&[
                ("COUPON_BIND_ADDR", "127.0.0.1"),
                ("COUPON_PORT", "3000"),
                ("COUPON_STORAGE", "Memory"),
                ("COUPON_DB_PATH", "/tmp/c.db"),
                ("COUPON_DB_MAX_CONNECTIONS", "2"),
            ]))
            .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.database_path, PathBuf::from("/tmp/c.db"));
        assert_eq!(config.storage.max_connections, 2);
    }

    #[test]
    fn test_bad_env_values_rejected() {
        let mut config = ApiConfig::default();
        let err = config
            .apply_env_overrides(env(&[("COUPON_PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "COUPON_PORT"));

        let err = config
            .apply_env_overrides(env(&[("COUPON_STORAGE", "redis")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validation() {
        let mut config = ApiConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.storage.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = ApiConfig::default();
        config.storage.database_path = PathBuf::new();
        assert!(config.validate().is_err());

        // Path is irrelevant for the memory backend
        config.storage.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = ApiConfig::load_from(Some(PathBuf::from("/nonexistent/coupon.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
