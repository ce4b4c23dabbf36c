use crate::{ConfigError, ConfigErrorResult, MIN_JWT_SECRET_LENGTH};

use std::path::Path;

use serde::Deserialize;

/// How ID tokens are verified. Exactly one key source is used:
/// `jwt_secret` (HS256) wins over `jwt_public_key_path` (RS256).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    /// PEM file, relative to the config directory unless absolute
    pub jwt_public_key_path: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (Some(secret), _) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
            }
            (None, Some(key_path)) => {
                let full_path = config_dir.join(key_path);
                if !full_path.exists() {
                    return Err(ConfigError::auth(format!(
                        "auth.jwt_public_key_path not found: {}",
                        full_path.display()
                    )));
                }
            }
            (None, None) => {
                return Err(ConfigError::auth(
                    "either auth.jwt_secret or auth.jwt_public_key_path must be set",
                ));
            }
        }

        if matches!(self.issuer.as_deref(), Some("")) {
            return Err(ConfigError::auth("auth.issuer cannot be empty when set"));
        }

        if matches!(self.audience.as_deref(), Some("")) {
            return Err(ConfigError::auth("auth.audience cannot be empty when set"));
        }

        Ok(())
    }

    /// "HS256", "RS256" or "none", for logging
    pub fn algorithm_name(&self) -> &'static str {
        if self.jwt_secret.is_some() {
            "HS256"
        } else if self.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        }
    }
}
