// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Profile
//!
//! Deployment profiles. A profile decides which literal record the configuration
//! starts from and which .env file the builder reads.

use crate::{
    env_keys::{DEV_ENV_FILE_NAME, PROD_ENV_FILE_NAME, RUST_ENV_KEY},
    errors::ConfigsError,
};
use std::{env, fmt, str::FromStr};

/// Named deployment variant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    #[default]
    Development,
    Production,
}

impl Profile {
    /// Reads the profile from `RUST_ENV`.
    ///
    /// - "production" or "prod" → `Production`
    /// - any other value or not set → `Development`
    pub fn from_rust_env() -> Profile {
        match env::var(RUST_ENV_KEY) {
            Ok(v) if matches!(v.to_lowercase().as_str(), "production" | "prod") => {
                Profile::Production
            }
            _ => Profile::Development,
        }
    }

    /// The .env file loaded for this profile when no explicit file is given.
    pub fn env_file_name(&self) -> &'static str {
        match self {
            Profile::Development => DEV_ENV_FILE_NAME,
            Profile::Production => PROD_ENV_FILE_NAME,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Profile::Production)
    }
}

impl FromStr for Profile {
    type Err = ConfigsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "develop" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(ConfigsError::invalid(
                "profile",
                format!("unknown profile `{other}`"),
            )),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Development => write!(f, "development"),
            Profile::Production => write!(f, "production"),
        }
    }
}
