// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment
//!
//! The environment record handed to the front-end collaborators: the backend base
//! address, the authentication tenant settings and the production flag.
//!
//! A record is immutable once constructed. The only way to change a value is to
//! build a different record, either by choosing another [`Profile`] or by letting the
//! `ConfigBuilder` apply environment overrides before the record is installed.
//!
//! ## Process-wide access
//!
//! [`init`] installs a validated record exactly once; [`get`] hands out the installed
//! record. When `get` runs before anything was installed it binds the literal record
//! of the profile named by `RUST_ENV`, so it never fails.

use crate::{errors::ConfigsError, profile::Profile};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::error;
use url::Url;

const DEFAULT_API_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_AUTH_DOMAIN: &str = "fsnd-stef.eu";
const DEFAULT_AUTH_AUDIENCE: &str = "fsnd-coffee-shop-api";
const DEFAULT_AUTH_CLIENT_ID: &str = "iN7VWkrFlkykT40RSZy6sSs4cJPsfZ9V";
const DEFAULT_AUTH_CALLBACK_URL: &str = "http://127.0.0.1:8100";

static ENVIRONMENT: OnceLock<EnvironmentConfig> = OnceLock::new();

/// Settings of the authentication provider.
///
/// Serialized with the key names the front-end reads (`url`, `clientId`,
/// `callbackURL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(rename = "url")]
    pub(crate) domain: String,
    pub(crate) audience: String,
    pub(crate) client_id: String,
    #[serde(rename = "callbackURL")]
    pub(crate) callback_url: String,
}

impl AuthConfig {
    /// Hostname or prefix identifying the authentication tenant.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Identifier of the API the issued credentials must target.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Public identifier of the registered client application.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Where the provider redirects after login.
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }
}

/// The environment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub(crate) production: bool,
    pub(crate) api_server_url: String,
    #[serde(rename = "auth0")]
    pub(crate) auth: AuthConfig,
}

impl EnvironmentConfig {
    /// Returns the literal record for `profile`.
    ///
    /// Both profiles share the same shape. Production only flips the `production`
    /// flag; its addresses are expected to come from `.env.prod` or the process
    /// environment through the `ConfigBuilder`.
    pub fn for_profile(profile: Profile) -> EnvironmentConfig {
        EnvironmentConfig {
            production: profile.is_production(),
            api_server_url: DEFAULT_API_SERVER_URL.into(),
            auth: AuthConfig {
                domain: DEFAULT_AUTH_DOMAIN.into(),
                audience: DEFAULT_AUTH_AUDIENCE.into(),
                client_id: DEFAULT_AUTH_CLIENT_ID.into(),
                callback_url: DEFAULT_AUTH_CALLBACK_URL.into(),
            },
        }
    }

    pub fn development() -> EnvironmentConfig {
        EnvironmentConfig::for_profile(Profile::Development)
    }

    pub fn production() -> EnvironmentConfig {
        EnvironmentConfig::for_profile(Profile::Production)
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Base address of the backend service.
    pub fn api_server_url(&self) -> &str {
        &self.api_server_url
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Prefixes a request path with the backend base address.
    ///
    /// Exactly one `/` separates the two, whatever either side carries.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_server_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Checks every field once, before the record is handed out.
    ///
    /// # Errors
    ///
    /// `ConfigsError::InvalidConfiguration` when a string field is blank, or when
    /// `apiServerUrl` / `auth.callbackUrl` do not parse as a URL with a scheme and
    /// a host.
    pub fn validate(&self) -> Result<(), ConfigsError> {
        require_url("apiServerUrl", &self.api_server_url)?;
        require_non_empty("auth.domain", &self.auth.domain)?;
        require_non_empty("auth.audience", &self.auth.audience)?;
        require_non_empty("auth.clientId", &self.auth.client_id)?;
        require_url("auth.callbackUrl", &self.auth.callback_url)?;
        Ok(())
    }

    /// Renders the record as the JSON document the front-end build consumes.
    pub fn to_frontend_json(&self) -> Result<String, ConfigsError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            error!(error = err.to_string(), "failed to render environment");
            ConfigsError::SerializationError(err.to_string())
        })
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigsError> {
    if value.trim().is_empty() {
        error!(field, "required configuration value is empty");
        return Err(ConfigsError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_url(field: &'static str, value: &str) -> Result<(), ConfigsError> {
    require_non_empty(field, value)?;

    if value != value.trim() {
        error!(field, value, "url has surrounding whitespace");
        return Err(ConfigsError::invalid(
            field,
            format!("`{value}` has surrounding whitespace"),
        ));
    }

    let url = Url::parse(value).map_err(|err| {
        error!(field, value, error = err.to_string(), "malformed url");
        ConfigsError::invalid(field, format!("`{value}` is not a valid url: {err}"))
    })?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => {
            error!(field, value, "url has no host");
            Err(ConfigsError::invalid(field, format!("`{value}` has no host")))
        }
    }
}

/// Installs `cfg` as the process-wide record.
///
/// # Errors
///
/// - `ConfigsError::InvalidConfiguration` if `cfg` does not validate
/// - `ConfigsError::AlreadyInitialized` if a record is already bound, including the
///   one bound lazily by an earlier [`get`]
pub fn init(cfg: EnvironmentConfig) -> Result<&'static EnvironmentConfig, ConfigsError> {
    cfg.validate()?;

    let mut installed = false;
    let bound = ENVIRONMENT.get_or_init(|| {
        installed = true;
        cfg
    });

    if !installed {
        error!("environment configuration was already initialized");
        return Err(ConfigsError::AlreadyInitialized);
    }

    Ok(bound)
}

/// Returns the process-wide record.
pub fn get() -> &'static EnvironmentConfig {
    ENVIRONMENT.get_or_init(|| EnvironmentConfig::for_profile(Profile::from_rust_env()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_api_server_url(url: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            api_server_url: url.into(),
            ..EnvironmentConfig::development()
        }
    }

    #[test]
    fn development_literal_matches_the_published_values() {
        let cfg = EnvironmentConfig::development();

        assert!(!cfg.is_production());
        assert_eq!(cfg.api_server_url(), "http://127.0.0.1:5000");
        assert_eq!(cfg.auth().domain(), "fsnd-stef.eu");
        assert_eq!(cfg.auth().audience(), "fsnd-coffee-shop-api");
        assert_eq!(cfg.auth().client_id(), "iN7VWkrFlkykT40RSZy6sSs4cJPsfZ9V");
        assert_eq!(cfg.auth().callback_url(), "http://127.0.0.1:8100");
    }

    #[test]
    fn production_literal_only_flips_the_flag() {
        let dev = EnvironmentConfig::development();
        let prod = EnvironmentConfig::production();

        assert!(prod.is_production());
        assert_eq!(prod.api_server_url(), dev.api_server_url());
        assert_eq!(prod.auth(), dev.auth());
    }

    #[test]
    fn both_literals_validate() {
        assert_eq!(EnvironmentConfig::development().validate(), Ok(()));
        assert_eq!(EnvironmentConfig::production().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let mut cfg = EnvironmentConfig::development();
        cfg.auth.client_id = "   ".into();

        assert_eq!(
            cfg.validate(),
            Err(ConfigsError::invalid("auth.clientId", "must not be empty"))
        );
    }

    #[test]
    fn validate_rejects_urls_without_scheme_or_host() {
        for bad in ["127.0.0.1:5000/api", "not a url", "mailto:someone@fsnd-stef.eu"] {
            let err = with_api_server_url(bad).validate().unwrap_err();
            assert!(
                matches!(err, ConfigsError::InvalidConfiguration { field: "apiServerUrl", .. }),
                "{bad} should be rejected, got {err:?}"
            );
        }

        let err = with_api_server_url(" http://127.0.0.1:5000\n").validate().unwrap_err();
        assert!(matches!(err, ConfigsError::InvalidConfiguration { field: "apiServerUrl", .. }));

        let mut cfg = EnvironmentConfig::development();
        cfg.auth.callback_url = String::new();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigsError::InvalidConfiguration { field: "auth.callbackUrl", .. })
        ));
    }

    #[test]
    fn api_url_uses_a_single_separator() {
        let cfg = with_api_server_url("http://127.0.0.1:5000/");

        assert_eq!(cfg.api_url("/drinks"), "http://127.0.0.1:5000/drinks");
        assert_eq!(
            cfg.api_url("drinks-detail"),
            "http://127.0.0.1:5000/drinks-detail"
        );
        assert_eq!(
            EnvironmentConfig::development().api_url("drinks/1"),
            "http://127.0.0.1:5000/drinks/1"
        );
    }

    #[test]
    fn frontend_json_uses_frontend_key_names() {
        let json = EnvironmentConfig::development().to_frontend_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["production"], false);
        assert_eq!(value["apiServerUrl"], "http://127.0.0.1:5000");
        assert_eq!(value["auth0"]["url"], "fsnd-stef.eu");
        assert_eq!(value["auth0"]["audience"], "fsnd-coffee-shop-api");
        assert_eq!(value["auth0"]["clientId"], "iN7VWkrFlkykT40RSZy6sSs4cJPsfZ9V");
        assert_eq!(value["auth0"]["callbackURL"], "http://127.0.0.1:8100");
    }

    // The only test in this binary touching the global binding.
    #[test]
    fn get_binds_once_and_refuses_reinit() {
        let first = get();
        let second = get();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.validate(), Ok(()));
        assert_eq!(
            init(EnvironmentConfig::development()),
            Err(ConfigsError::AlreadyInitialized)
        );
    }
}
