// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Configuration Builder
//!
//! This module provides the `ConfigBuilder`, which produces the environment record
//! for one deployment profile.
//!
//! ## Architecture
//!
//! The `ConfigBuilder` works in three phases:
//!
//! 1. **Initialization**: Users create a builder and pick the profile and the sources
//!    they want (e.g., `profile()`, `env_file()`, `literal_only()`, `logging()`).
//!
//! 2. **Environment Loading**: The builder loads the .env file of the selected profile
//!    (`.env.develop` or `.env.prod`) into the process environment. A missing file is
//!    ignored.
//!
//! 3. **Configuration Building**: The builder starts from the profile's literal record,
//!    applies the overrides found in the environment and validates the result once.
//!    A record that fails validation is never returned.
//!
//! ## Encoded values
//!
//! Values prefixed with `!!` (see `env_keys`) are base64 encoded and are decoded
//! before use.

use crate::{
    env_keys::{
        API_SERVER_URL_ENV_KEY, AUTH_AUDIENCE_ENV_KEY, AUTH_CALLBACK_URL_ENV_KEY,
        AUTH_CLIENT_ID_ENV_KEY, AUTH_DOMAIN_ENV_KEY, ENCODED_PREFIX, PRODUCTION_ENV_KEY,
    },
    environment::EnvironmentConfig,
    errors::ConfigsError,
    logging,
    profile::Profile,
};
use base64::{Engine, engine::general_purpose};
use dotenvy::from_filename;
use std::{env, path::PathBuf, str::FromStr};
use tracing::{debug, error, info};

/// The environment record builder.
///
/// By default the builder targets the development profile, reads that profile's .env
/// file and applies environment overrides. Logging is only installed on request.
///
/// # Example
///
/// ```rust
/// use environment_configs::{ConfigBuilder, Profile};
///
/// let cfg = ConfigBuilder::new()
///     .profile(Profile::Development)
///     .skip_env_file()
///     .literal_only()
///     .build()
///     .unwrap();
///
/// assert_eq!(cfg.api_server_url(), "http://127.0.0.1:5000");
/// ```
#[derive(Debug)]
pub struct ConfigBuilder {
    profile: Profile,
    env_file: Option<PathBuf>,
    load_env_file: bool,
    env_overrides: bool,
    logging: bool,
    envs_already_loaded: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            profile: Profile::default(),
            env_file: None,
            load_env_file: true,
            env_overrides: true,
            logging: false,
            envs_already_loaded: false,
        }
    }
}

impl ConfigBuilder {
    /// Creates a new instance of the `ConfigBuilder` for the development profile.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Selects the deployment profile the record starts from.
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Reads `path` instead of the profile's default .env file.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self.load_env_file = true;
        self
    }

    /// Does not read any .env file.
    pub fn skip_env_file(mut self) -> Self {
        self.load_env_file = false;
        self
    }

    /// Ignores environment overrides; `build()` returns the profile's literal record.
    pub fn literal_only(mut self) -> Self {
        self.env_overrides = false;
        self
    }

    /// Installs the tracing subscriber as part of `build()`.
    pub fn logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Loads environment variables from the selected .env file.
    ///
    /// The file given to `env_file()` wins; otherwise the profile decides:
    /// - `Production` → `.env.prod`
    /// - `Development` → `.env.develop`
    ///
    /// Variables already present in the process environment are not overwritten.
    /// If the file doesn't exist, loading is silently skipped.
    ///
    /// # Note
    ///
    /// This method is called automatically by `build()` if environment variables
    /// haven't been loaded yet, so manual invocation is usually unnecessary.
    pub fn load_envs(&self) {
        let path = self
            .env_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.profile.env_file_name()));

        if let Err(err) = from_filename(&path) {
            debug!(
                path = %path.display(),
                error = err.to_string(),
                "env file was not loaded"
            );
        }
    }

    /// Builds the record from the process environment.
    ///
    /// # Errors
    ///
    /// - `ConfigsError::LoggingSetupError` if `logging()` was requested and the
    ///   subscriber could not be installed
    /// - `ConfigsError::InvalidConfiguration` if the resulting record is invalid
    pub fn build(&mut self) -> Result<EnvironmentConfig, ConfigsError> {
        if self.load_env_file && !self.envs_already_loaded {
            self.load_envs();
            self.envs_already_loaded = true;
        }

        let vars = env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    debug!(key = ?key, "skipping non utf-8 environment variable");
                    None
                }
            }
        });

        self.build_from_vars(vars)
    }

    /// Builds the record from an explicit set of `(key, value)` pairs.
    ///
    /// No .env file is read; `build()` uses this with `std::env::vars()` once the file
    /// is loaded.
    pub fn build_from_vars<I, K, V>(&self, vars: I) -> Result<EnvironmentConfig, ConfigsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if self.logging {
            logging::install()?;
        }

        let mut cfg = EnvironmentConfig::for_profile(self.profile);

        if self.env_overrides {
            for (key, value) in vars {
                let key: String = key.into();
                let value: String = value.into();

                if self.fill_app(&mut cfg, &key, &value) {
                    continue;
                }
                if self.fill_auth(&mut cfg, &key, &value) {
                    continue;
                }
            }
        }

        cfg.validate()?;

        info!(
            profile = %self.profile,
            production = cfg.is_production(),
            api_server_url = cfg.api_server_url(),
            "environment configuration built"
        );

        Ok(cfg)
    }
}

// Configuration filling methods
impl ConfigBuilder {
    /// Fills the top-level settings.
    ///
    /// # Environment Variables
    ///
    /// - `PRODUCTION`: overrides the profile flag; `true`/`false` or `1`/`0`, any case
    /// - `API_SERVER_URL`: base address of the backend service
    ///
    /// # Returns
    ///
    /// `true` if the key was recognized and processed, `false` otherwise.
    fn fill_app(&self, cfg: &mut EnvironmentConfig, key: &str, value: &str) -> bool {
        match key {
            PRODUCTION_ENV_KEY => {
                cfg.production = self
                    .resolve(key, value)
                    .and_then(|v| parse_flag(key, &v))
                    .unwrap_or(cfg.production);
                true
            }
            API_SERVER_URL_ENV_KEY => {
                cfg.api_server_url = self.get_from_env(key, value, cfg.api_server_url.clone());
                true
            }
            _ => false,
        }
    }

    /// Fills the authentication provider settings.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_DOMAIN`: tenant hostname or prefix
    /// - `AUTH_AUDIENCE`: API identifier the credentials must target
    /// - `AUTH_CLIENT_ID`: public client identifier
    /// - `AUTH_CALLBACK_URL`: post-login redirect address
    ///
    /// # Returns
    ///
    /// `true` if the key was recognized and processed, `false` otherwise.
    fn fill_auth(&self, cfg: &mut EnvironmentConfig, key: &str, value: &str) -> bool {
        let auth = &mut cfg.auth;

        match key {
            AUTH_DOMAIN_ENV_KEY => {
                auth.domain = self.get_from_env(key, value, auth.domain.clone());
                true
            }
            AUTH_AUDIENCE_ENV_KEY => {
                auth.audience = self.get_from_env(key, value, auth.audience.clone());
                true
            }
            AUTH_CLIENT_ID_ENV_KEY => {
                auth.client_id = self.get_from_env(key, value, auth.client_id.clone());
                true
            }
            AUTH_CALLBACK_URL_ENV_KEY => {
                auth.callback_url = self.get_from_env(key, value, auth.callback_url.clone());
                true
            }
            _ => false,
        }
    }
}

// Helper methods
impl ConfigBuilder {
    /// Parses an override value, decoding it first when it carries `ENCODED_PREFIX`.
    ///
    /// Falls back to `default` when decoding or parsing fails.
    fn get_from_env<T>(&self, key: &str, value: &str, default: T) -> T
    where
        T: FromStr,
    {
        let Some(raw) = self.resolve(key, value) else {
            return default;
        };

        match raw.parse() {
            Ok(v) => {
                debug!(key, "environment override applied");
                v
            }
            Err(_) => {
                error!(key, value = raw, "parse went wrong");
                default
            }
        }
    }

    /// Decodes `value` when needed and strips surrounding whitespace.
    fn resolve(&self, key: &str, value: &str) -> Option<String> {
        let raw = match value.trim().strip_prefix(ENCODED_PREFIX) {
            None => value.to_owned(),
            Some(encoded) => self.decoded(key, encoded)?,
        };

        Some(raw.trim().to_owned())
    }

    /// Decodes a base64-encoded UTF-8 string.
    fn decoded(&self, key: &str, text: &str) -> Option<String> {
        let decoded = general_purpose::STANDARD
            .decode(text)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok());

        if decoded.is_none() {
            error!(key, "encoded value is not base64 utf-8");
        }

        decoded
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            error!(key, value, "not a boolean flag");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ConfigBuilder {
        ConfigBuilder::new().skip_env_file()
    }

    #[test]
    fn no_overrides_yields_the_profile_literal() {
        let vars: Vec<(String, String)> = vec![];

        let dev = builder().build_from_vars(vars.clone()).unwrap();
        let prod = builder()
            .profile(Profile::Production)
            .build_from_vars(vars)
            .unwrap();

        assert_eq!(dev, EnvironmentConfig::development());
        assert_eq!(prod, EnvironmentConfig::production());
    }

    #[test]
    fn overrides_replace_matching_fields() {
        let cfg = builder()
            .build_from_vars([
                ("PRODUCTION", "true"),
                ("API_SERVER_URL", "https://api.coffee.test"),
                ("AUTH_DOMAIN", "coffee.eu"),
                ("AUTH_AUDIENCE", "coffee-api"),
                ("AUTH_CLIENT_ID", "client-123"),
                ("AUTH_CALLBACK_URL", "https://coffee.test/callback"),
            ])
            .unwrap();

        assert!(cfg.is_production());
        assert_eq!(cfg.api_server_url(), "https://api.coffee.test");
        assert_eq!(cfg.auth().domain(), "coffee.eu");
        assert_eq!(cfg.auth().audience(), "coffee-api");
        assert_eq!(cfg.auth().client_id(), "client-123");
        assert_eq!(cfg.auth().callback_url(), "https://coffee.test/callback");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let cfg = builder()
            .build_from_vars([("PATH", "/usr/bin"), ("AUTH0_URL", "elsewhere")])
            .unwrap();

        assert_eq!(cfg, EnvironmentConfig::development());
    }

    #[test]
    fn literal_only_ignores_overrides() {
        let cfg = builder()
            .literal_only()
            .build_from_vars([("API_SERVER_URL", "https://api.coffee.test")])
            .unwrap();

        assert_eq!(cfg.api_server_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn unparsable_production_flag_keeps_the_literal() {
        let cfg = builder()
            .profile(Profile::Production)
            .build_from_vars([("PRODUCTION", "yes please")])
            .unwrap();

        assert!(cfg.is_production());
    }

    #[test]
    fn production_flag_accepts_any_case_and_digits() {
        for (value, expected) in [("TRUE", true), ("1", true), ("False", false), ("0", false)] {
            let cfg = builder()
                .build_from_vars([("PRODUCTION", value)])
                .unwrap();
            assert_eq!(cfg.is_production(), expected, "PRODUCTION={value}");
        }
    }

    #[test]
    fn padded_overrides_are_trimmed() {
        let cfg = builder()
            .build_from_vars([
                ("API_SERVER_URL", "  http://127.0.0.1:5000/ \n"),
                ("AUTH_DOMAIN", "\tcoffee.eu "),
            ])
            .unwrap();

        assert_eq!(cfg.api_server_url(), "http://127.0.0.1:5000/");
        assert_eq!(cfg.api_url("/drinks"), "http://127.0.0.1:5000/drinks");
        assert_eq!(cfg.auth().domain(), "coffee.eu");
    }

    #[test]
    fn encoded_values_are_decoded() {
        // "client-from-vault"
        let cfg = builder()
            .build_from_vars([("AUTH_CLIENT_ID", "!!Y2xpZW50LWZyb20tdmF1bHQ=")])
            .unwrap();

        assert_eq!(cfg.auth().client_id(), "client-from-vault");
    }

    #[test]
    fn undecodable_values_keep_the_literal() {
        let cfg = builder()
            .build_from_vars([("AUTH_CLIENT_ID", "!!***")])
            .unwrap();

        assert_eq!(cfg.auth().client_id(), "iN7VWkrFlkykT40RSZy6sSs4cJPsfZ9V");
    }

    #[test]
    fn invalid_override_fails_the_build() {
        let err = builder()
            .build_from_vars([("AUTH_CALLBACK_URL", "127.0.0.1:8100")])
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigsError::InvalidConfiguration { field: "auth.callbackUrl", .. }
        ));

        let err = builder()
            .build_from_vars([("AUTH_AUDIENCE", "")])
            .unwrap_err();

        assert_eq!(
            err,
            ConfigsError::InvalidConfiguration {
                field: "auth.audience",
                reason: "must not be empty".into(),
            }
        );
    }
}
