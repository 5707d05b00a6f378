//! Store configuration
//!
//! The backend is chosen from environment variables:
//! - `STORE_BACKEND`: `memory` or `sqlite` (default `sqlite` when compiled in)
//! - `STORE_SQLITE_PATH`: path of the SQLite file
//! - `STORE_POOL_SIZE`: connection pool size
//! - `STORE_TIMEOUT_SECONDS`: connection timeout

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::errors::StoreError;
use super::in_memory::InMemoryStore;
use super::SharedStore;

/// Default SQLite file location
pub const DEFAULT_SQLITE_PATH: &str = "./data/pressure_log.db";

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map, nothing survives a restart
    Memory,
    /// SQLite file (or in-memory database)
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(StoreError::Config(format!("Unsupported store backend: {}", other))),
        }
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        #[cfg(feature = "sqlite")]
        {
            StoreBackend::Sqlite
        }
        #[cfg(not(feature = "sqlite"))]
        {
            StoreBackend::Memory
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backend to open
    pub backend: StoreBackend,
    /// Path to the SQLite file; `None` opens an in-memory SQLite database
    pub sqlite_path: Option<String>,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sqlite_path: Some(DEFAULT_SQLITE_PATH.to_string()),
            pool_size: 4,
            timeout_seconds: 30,
        }
    }
}

impl StoreConfig {
    /// Create a store configuration from environment variables
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create a store configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse::<StoreBackend>()?,
            None => defaults.backend,
        };

        let sqlite_path = lookup("STORE_SQLITE_PATH").or(defaults.sqlite_path);

        let pool_size = lookup("STORE_POOL_SIZE")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.pool_size);

        if pool_size == 0 {
            return Err(StoreError::Config("STORE_POOL_SIZE must be at least 1".to_string()));
        }

        let timeout_seconds = lookup("STORE_TIMEOUT_SECONDS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        info!(
            "Store configuration: backend={:?}, pool_size={}, timeout={}s",
            backend, pool_size, timeout_seconds
        );

        Ok(Self {
            backend,
            sqlite_path,
            pool_size,
            timeout_seconds,
        })
    }
}

/// Open the store described by `config`
pub fn open_store(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => {
            let store = match &config.sqlite_path {
                Some(path) => super::sqlite::SqliteStore::open(path, config)?,
                None => super::sqlite::SqliteStore::open_in_memory()?,
            };
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.sqlite_path.as_deref(), Some(DEFAULT_SQLITE_PATH));
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_from_lookup_memory_backend() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "Memory"),
            ("STORE_POOL_SIZE", "8"),
            ("STORE_TIMEOUT_SECONDS", "not-a-number"),
        ]))
        .unwrap();

        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.pool_size, 8);
        // Unparseable values fall back to defaults
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_backend() {
        let result = StoreConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "redis")]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Unsupported store backend"));
    }

    #[test]
    fn test_from_lookup_rejects_zero_pool() {
        let result = StoreConfig::from_lookup(lookup_from(&[("STORE_POOL_SIZE", "0")]));
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[test]
    fn test_open_memory_store() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            ..StoreConfig::default()
        };
        let store = open_store(&config).unwrap();
        store.set("registered-users", "[]").unwrap();
        assert_eq!(store.get("registered-users").unwrap().as_deref(), Some("[]"));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_open_sqlite_in_memory_store() {
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            sqlite_path: None,
            ..StoreConfig::default()
        };
        let store = open_store(&config).unwrap();
        store.set("dependents-user-1", "[]").unwrap();
        assert_eq!(store.get("dependents-user-1").unwrap().as_deref(), Some("[]"));
    }
}
