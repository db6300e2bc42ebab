// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment Keys
//!
//! Constant definitions for the environment variable keys and files read by the
//! `ConfigBuilder`.
//!
//! Each field of the environment record can be overridden by a variable of the same
//! name, either set in the process environment or in the profile's .env file.

/// Environment file names for the deployment profiles
pub const DEV_ENV_FILE_NAME: &str = "./.env.develop";
pub const PROD_ENV_FILE_NAME: &str = "./.env.prod";

/// Selects the active profile
pub const RUST_ENV_KEY: &str = "RUST_ENV";

/// Record overrides
pub const PRODUCTION_ENV_KEY: &str = "PRODUCTION";
pub const API_SERVER_URL_ENV_KEY: &str = "API_SERVER_URL";
pub const AUTH_DOMAIN_ENV_KEY: &str = "AUTH_DOMAIN";
pub const AUTH_AUDIENCE_ENV_KEY: &str = "AUTH_AUDIENCE";
pub const AUTH_CLIENT_ID_ENV_KEY: &str = "AUTH_CLIENT_ID";
pub const AUTH_CALLBACK_URL_ENV_KEY: &str = "AUTH_CALLBACK_URL";

/// Values carrying this prefix are base64 encoded
pub const ENCODED_PREFIX: &str = "!!";
