// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Environment Configs
//!
//! `environment_configs` provides the environment record of the coffee shop front-end:
//! the backend base address, the authentication provider settings and the production
//! flag. The record is built once at startup and read-only thereafter.
//!
//! ## Features
//!
//! - Literal records per deployment profile (development, production)
//! - Overrides from the process environment and per-profile .env files
//! - One-time validation that fails fast on blank fields and malformed URLs
//! - A write-once process-wide binding
//!
//! ## Example
//!
//! ```rust
//! use environment_configs::{ConfigBuilder, Profile, environment};
//!
//! fn setup() -> Result<(), environment_configs::errors::ConfigsError> {
//!     let cfg = ConfigBuilder::new()
//!         .profile(Profile::from_rust_env())
//!         .build()?;
//!
//!     let cfg = environment::init(cfg)?;
//!     println!("{}", cfg.api_url("/drinks"));
//!
//!     Ok(())
//! }
//! ```

mod configs_builder;
pub mod env_keys;
pub mod environment;
pub mod errors;
pub mod logging;
mod profile;

pub use configs_builder::ConfigBuilder;
pub use environment::{AuthConfig, EnvironmentConfig, get, init};
pub use profile::Profile;
