//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COOKIE_CANARY` prefix and nested values use double underscores as separators.
//!
//! The bare `CANARY_VALUE` and `SECRET_KEY_BASE` variables are honoured as
//! well and take precedence over their prefixed forms.
//!
//! # Example
//!
//! ```no_run
//! use cookie_canary::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod canary;
mod error;
mod keys;
mod redis;
mod server;
mod session;

pub use canary::{CanaryConfig, ResponseBody};
pub use error::{ConfigError, ValidationError};
pub use keys::KeysConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use session::{SessionConfig, StoreBackend};

use serde::Deserialize;

use crate::domain::cookie::KeyMaterial;

/// Bare variable holding the canary value.
pub const CANARY_VALUE_VAR: &str = "CANARY_VALUE";

/// Bare variable holding the secret key base.
pub const SECRET_KEY_BASE_VAR: &str = "SECRET_KEY_BASE";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Canary value and response shape
    #[serde(default)]
    pub canary: CanaryConfig,

    /// Cookie signing and encryption keys
    #[serde(default)]
    pub keys: KeysConfig,

    /// Session cookie and store settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Redis configuration, used when `session.store = redis`
    #[serde(default)]
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COOKIE_CANARY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `CANARY_VALUE` and `SECRET_KEY_BASE` overrides
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COOKIE_CANARY__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `COOKIE_CANARY__SESSION__STORE=redis` -> `session.store = redis`
    /// - `CANARY_VALUE=abc123` -> `canary.value = abc123`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COOKIE_CANARY")
                    .separator("__"),
            )
            .set_override_option("canary.value", std::env::var(CANARY_VALUE_VAR).ok())?
            .set_override_option(
                "keys.secret_key_base",
                std::env::var(SECRET_KEY_BASE_VAR).ok(),
            )?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Port and timeout ranges
    /// - Key material presence and lengths
    /// - Session TTL and cookie name
    /// - Redis URL when the Redis store is selected
    ///
    /// A missing canary value is not a validation error.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.keys.validate()?;
        self.session.validate()?;
        if self.session.store == StoreBackend::Redis {
            self.redis.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Build cookie key material from the configured source
    pub fn key_material(&self) -> Result<KeyMaterial, ValidationError> {
        self.keys.key_material()
    }

    /// Whether issued cookies carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.session.secure_cookies(self.is_production())
    }
}
