//! Configuration error types

use thiserror::Error;

use crate::domain::cookie::KeyMaterialError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Session TTL must be between 1 second and 365 days")]
    InvalidSessionTtl,

    #[error("Session purge interval must be greater than zero")]
    InvalidPurgeInterval,

    #[error("Invalid session cookie name: {0:?}")]
    InvalidCookieName(String),

    #[error("Configure either secret_key_base or signing_key/encryption_key, not both")]
    AmbiguousKeySource,

    #[error("{0} is not valid base64")]
    InvalidKeyEncoding(&'static str),

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(#[from] KeyMaterialError),
}
