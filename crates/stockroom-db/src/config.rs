//! Inventory configuration.
//!
//! Binaries load configuration from environment variables with fallback to
//! defaults. The library never reads the environment on its own.

use std::env;
use thiserror::Error;

use crate::pool::DbConfig;
use stockroom_core::DEFAULT_LOW_STOCK_THRESHOLD;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./stockroom.db";

/// Configuration for [`crate::InventoryService`].
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Storage settings.
    pub db: DbConfig,

    /// Threshold used by `low_stock(None)`.
    pub low_stock_threshold: i64,
}

impl InventoryConfig {
    /// Configuration with the default low-stock threshold.
    pub fn new(db: DbConfig) -> Self {
        InventoryConfig {
            db,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// Private in-memory store (for tests).
    pub fn in_memory() -> Self {
        InventoryConfig::new(DbConfig::in_memory())
    }

    /// Sets the default low-stock threshold.
    pub fn low_stock_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable                        | Default          |
    /// |---------------------------------|------------------|
    /// | `STOCKROOM_DB_PATH`             | `./stockroom.db` |
    /// | `STOCKROOM_DB_MAX_CONNECTIONS`  | `5`              |
    /// | `STOCKROOM_LOW_STOCK_THRESHOLD` | `5`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`InventoryConfig::from_env`] but reads variables through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup("STOCKROOM_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let max_connections: u32 = lookup("STOCKROOM_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STOCKROOM_DB_MAX_CONNECTIONS".to_string()))?;

        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOCKROOM_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        let low_stock_threshold: i64 = lookup("STOCKROOM_LOW_STOCK_THRESHOLD")
            .unwrap_or_else(|| DEFAULT_LOW_STOCK_THRESHOLD.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("STOCKROOM_LOW_STOCK_THRESHOLD".to_string()))?;

        if low_stock_threshold < 0 {
            return Err(ConfigError::InvalidValue(
                "STOCKROOM_LOW_STOCK_THRESHOLD".to_string(),
            ));
        }

        let db = DbConfig::new(path).max_connections(max_connections);

        Ok(InventoryConfig {
            db,
            low_stock_threshold,
        })
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig::new(DbConfig::new(DEFAULT_DB_PATH))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.db.database_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn test_overrides() {
        let config = InventoryConfig::from_lookup(lookup_from(&[
            ("STOCKROOM_DB_PATH", "/var/lib/stockroom/inv.db"),
            ("STOCKROOM_DB_MAX_CONNECTIONS", "2"),
            ("STOCKROOM_LOW_STOCK_THRESHOLD", "12"),
        ]))
        .unwrap();

        assert_eq!(
            config.db.database_path,
            PathBuf::from("/var/lib/stockroom/inv.db")
        );
        assert_eq!(config.db.max_connections, 2);
        assert_eq!(config.low_stock_threshold, 12);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = InventoryConfig::from_lookup(lookup_from(&[(
            "STOCKROOM_LOW_STOCK_THRESHOLD",
            "five",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("STOCKROOM_LOW_STOCK_THRESHOLD"));

        assert!(InventoryConfig::from_lookup(lookup_from(&[(
            "STOCKROOM_LOW_STOCK_THRESHOLD",
            "-1"
        )]))
        .is_err());

        assert!(InventoryConfig::from_lookup(lookup_from(&[(
            "STOCKROOM_DB_MAX_CONNECTIONS",
            "0"
        )]))
        .is_err());
    }
}
