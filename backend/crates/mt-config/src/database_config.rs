use crate::error::ensure_in_range;
use crate::{
    ConfigError, ConfigErrorResult, DB_MAX_CONNECTIONS_RANGE, DEFAULT_DB_MAX_CONNECTIONS,
    DEFAULT_IDENTITY_DATABASE_FILENAME, DEFAULT_STORE_DATABASE_FILENAME,
};

use std::path::Path;

use serde::Deserialize;

/// Two SQLite files: application documents, and the identity provider's records
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub store_path: String,
    pub identity_path: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            store_path: String::from(DEFAULT_STORE_DATABASE_FILENAME),
            identity_path: String::from(DEFAULT_IDENTITY_DATABASE_FILENAME),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::validate_path("database.store_path", &self.store_path)?;
        Self::validate_path("database.identity_path", &self.identity_path)?;

        if self.store_path == self.identity_path {
            return Err(ConfigError::database(
                "database.store_path and database.identity_path must differ",
            ));
        }

        ensure_in_range(
            "Database",
            "database.max_connections",
            self.max_connections,
            DB_MAX_CONNECTIONS_RANGE,
        )
    }

    // Database files must stay inside the config directory
    fn validate_path(name: &str, value: &str) -> ConfigErrorResult<()> {
        if value.is_empty() {
            return Err(ConfigError::database(format!("{} cannot be empty", name)));
        }

        if Path::new(value).is_absolute() || value.contains("..") {
            return Err(ConfigError::database(format!(
                "{} must be relative and cannot contain '..'",
                name
            )));
        }

        Ok(())
    }
}
