//! Canary error taxonomy.
//!
//! Each variant maps to exactly one HTTP status code.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::cookie::IntegrityError;
use crate::ports::SessionStoreError;

/// Errors raised while issuing or verifying the canary.
#[derive(Debug, Error)]
pub enum CanaryError {
    /// Canary value or key material is not configured.
    #[error("Required configuration missing: {0}")]
    ConfigMissing(&'static str),

    /// A client-supplied cookie failed verification.
    #[error("Integrity check failed for {cookie} cookie: {source}")]
    Integrity {
        cookie: &'static str,
        #[source]
        source: IntegrityError,
    },

    /// The session store could not be reached.
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CanaryError {
    pub fn integrity(cookie: &'static str, source: IntegrityError) -> Self {
        CanaryError::Integrity { cookie, source }
    }

    /// Maps the error to an HTTP status code.
    ///
    /// - `ConfigMissing`: 500, a server fault
    /// - `Integrity`: 400, client-supplied data
    /// - `StoreUnavailable`: 503, safe to retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            CanaryError::ConfigMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CanaryError::Integrity { .. } => StatusCode::BAD_REQUEST,
            CanaryError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns true if the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CanaryError::StoreUnavailable(_))
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CanaryError::ConfigMissing(_) => "CONFIG_MISSING",
            CanaryError::Integrity { .. } => "INTEGRITY_ERROR",
            CanaryError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<SessionStoreError> for CanaryError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::Unavailable(msg) => CanaryError::StoreUnavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_missing_maps_to_500() {
        let err = CanaryError::ConfigMissing("CANARY_VALUE");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("CANARY_VALUE"));
    }

    #[test]
    fn integrity_maps_to_400() {
        let err = CanaryError::integrity("signed", IntegrityError::InvalidSignature);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("signed"));
    }

    #[test]
    fn store_unavailable_maps_to_503_and_is_retryable() {
        let err: CanaryError = SessionStoreError::Unavailable("connection refused".into()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.is_retryable());
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }
}
