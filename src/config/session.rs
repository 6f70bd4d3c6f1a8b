//! Session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::session::DEFAULT_SESSION_COOKIE;

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the session identifier cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session record lifetime in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Seconds between sweeps of expired in-memory records
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,

    /// Session store backend
    #[serde(default)]
    pub store: StoreBackend,

    /// Force the `Secure` cookie attribute on or off.
    /// Defaults to on in production.
    #[serde(default)]
    pub secure_cookies: Option<bool>,
}

/// Session store backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

impl SessionConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Get the in-memory sweep period as Duration
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Whether cookies carry `Secure`; explicit setting wins over environment
    pub fn secure_cookies(&self, is_production: bool) -> bool {
        self.secure_cookies.unwrap_or(is_production)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 || self.ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.purge_interval_secs == 0 {
            return Err(ValidationError::InvalidPurgeInterval);
        }
        if !is_cookie_token(&self.cookie_name) {
            return Err(ValidationError::InvalidCookieName(self.cookie_name.clone()));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl(),
            purge_interval_secs: default_purge_interval(),
            store: StoreBackend::default(),
            secure_cookies: None,
        }
    }
}

/// RFC 6265 cookie-name token: visible ASCII without separators.
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

fn default_cookie_name() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

fn default_ttl() -> u64 {
    86_400
}

fn default_purge_interval() -> u64 {
    60
}
