use crate::{CoreError, ErrorLocation};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an identity signs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignInProvider {
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "google.com")]
    Google,
    #[serde(rename = "apple.com")]
    Apple,
}

impl SignInProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Google => "google.com",
            Self::Apple => "apple.com",
        }
    }
}

impl fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignInProvider {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(Self::Password),
            "google.com" => Ok(Self::Google),
            "apple.com" => Ok(Self::Apple),
            _ => Err(CoreError::InvalidSignInProvider {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
