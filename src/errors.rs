// Copyright (c) 2025, The Ruskit Authors
// MIT License
// All rights reserved.

//! # Errors
//!
//! Error types for the environment_configs crate.
//!
//! Configuration is either fully valid or the application must not start, so the
//! error surface is small: one validation kind carrying the offending field, plus
//! the two setup failures that can happen around it.

use thiserror::Error;

/// Errors that can occur while building or installing the environment configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigsError {
    /// A required field is empty or malformed.
    ///
    /// Raised once at startup. There is no recovery path: the caller is expected to
    /// abort rather than continue with a partial configuration.
    ///
    /// # Arguments
    ///
    /// * `field` - Dotted name of the offending field (e.g. `auth.callbackUrl`)
    /// * `reason` - What is wrong with the value
    #[error("invalid configuration for `{field}` - {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// The process-wide configuration was already installed.
    #[error("environment configuration was already initialized")]
    AlreadyInitialized,

    /// Error that occurred while setting up the logging subsystem.
    ///
    /// This error indicates that a global tracing subscriber could not be
    /// installed, usually because another one was registered first.
    #[error("failed to configure logging")]
    LoggingSetupError,

    /// The record could not be rendered for the front-end build.
    ///
    /// # Arguments
    ///
    /// * `0` - A description of the serialization error
    #[error("failed to render environment - `{0}`")]
    SerializationError(String),
}

impl ConfigsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigsError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
