use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] mt_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] mt_db::DbError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] mt_auth::AuthError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Metrics error: {message}")]
    Metrics { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
