use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    DatabaseConfig, LoggingConfig, MetricsConfig, RateLimitConfig, RetryConfig, ServerConfig,
    StoreConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub retry: RetryConfig,
    pub rate_limit: RateLimitConfig,
    pub store: StoreConfig,
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for MT_CONFIG_DIR env var, else use ./.macrotrack/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply MT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: MT_CONFIG_DIR env var > ./.macrotrack/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&config_dir)?;
        self.retry.validate()?;
        self.rate_limit.validate()?;
        self.store.validate()?;

        Ok(())
    }

    /// Absolute path of the document store database
    pub fn store_database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.store_path))
    }

    /// Absolute path of the identity provider database
    pub fn identity_database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.identity_path))
    }

    /// Absolute path of the log file, when file logging is configured
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(filename) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(filename),
            )),
            None => Ok(None),
        }
    }

    /// Read the RS256 public key named by `auth.jwt_public_key_path`
    pub fn read_public_key(&self) -> ConfigErrorResult<Option<String>> {
        let Some(key_path) = &self.auth.jwt_public_key_path else {
            return Ok(None);
        };

        let full_path = Self::config_dir()?.join(key_path);
        std::fs::read_to_string(&full_path)
            .map(Some)
            .map_err(|e| ConfigError::Io {
                path: full_path,
                source: e,
            })
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: store={}, identity={} (max {} connections)",
            self.database.store_path, self.database.identity_path, self.database.max_connections
        );
        info!(
            "  auth: {} (issuer: {}, audience: {})",
            self.auth.algorithm_name(),
            self.auth.issuer.as_deref().unwrap_or("any"),
            self.auth.audience.as_deref().unwrap_or("any")
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier
        );
        info!(
            "  rate_limit: {}/{}s per caller",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );
        info!(
            "  store: users_collection={}, delete_batch_size={}",
            self.store.users_collection, self.store.delete_batch_size
        );
        info!("  metrics: {}", if self.metrics.enabled { "enabled" } else { "disabled" });
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("MT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("MT_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("MT_DATABASE_STORE_PATH", &mut self.database.store_path);
        Self::apply_env_string("MT_DATABASE_IDENTITY_PATH", &mut self.database.identity_path);
        Self::apply_env_parse(
            "MT_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("MT_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "MT_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );
        Self::apply_env_option_string("MT_AUTH_ISSUER", &mut self.auth.issuer);
        Self::apply_env_option_string("MT_AUTH_AUDIENCE", &mut self.auth.audience);

        // Logging
        Self::apply_env_parse("MT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("MT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("MT_LOG_FILE", &mut self.logging.file);

        // Retry
        Self::apply_env_parse("MT_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "MT_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("MT_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "MT_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("MT_RETRY_JITTER", &mut self.retry.jitter);

        // Rate limit
        Self::apply_env_parse(
            "MT_RATE_LIMIT_MAX_REQUESTS",
            &mut self.rate_limit.max_requests,
        );
        Self::apply_env_parse(
            "MT_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Store
        Self::apply_env_string(
            "MT_STORE_USERS_COLLECTION",
            &mut self.store.users_collection,
        );
        Self::apply_env_parse(
            "MT_STORE_DELETE_BATCH_SIZE",
            &mut self.store.delete_batch_size,
        );

        // Metrics
        Self::apply_env_bool("MT_METRICS_ENABLED", &mut self.metrics.enabled);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
