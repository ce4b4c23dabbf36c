mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod metrics_config;
mod rate_limit_config;
mod retry_config;
mod server_config;
mod store_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use metrics_config::MetricsConfig;
pub use rate_limit_config::RateLimitConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use store_config::StoreConfig;

const CONFIG_DIR_ENV: &str = "MT_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".macrotrack";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_STORE_DATABASE_FILENAME: &str = "store.db";
const DEFAULT_IDENTITY_DATABASE_FILENAME: &str = "identity.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DB_MAX_CONNECTIONS_RANGE: std::ops::RangeInclusive<u32> = 1..=64;

const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

const DEFAULT_USERS_COLLECTION: &str = "users";
const DEFAULT_DELETE_BATCH_SIZE: u32 = 500;
const DELETE_BATCH_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=10_000;

const DEFAULT_METRICS_ENABLED: bool = true;

#[cfg(test)]
mod tests;
