// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Logging
//!
//! Installs the global tracing subscriber. The filter comes from `RUST_LOG` and falls
//! back to `info` when the variable is unset or unparsable.

use crate::errors::ConfigsError;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Installs a compact fmt subscriber for the whole process.
///
/// # Errors
///
/// `ConfigsError::LoggingSetupError` if a global subscriber is already set.
pub fn install() -> Result<(), ConfigsError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).compact())
        .try_init()
        .map_err(|err| {
            error!(error = err.to_string(), "failed to install logging provider");
            ConfigsError::LoggingSetupError
        })
}
