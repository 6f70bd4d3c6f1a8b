//! HTTP DTOs for canary endpoints.

use serde::Serialize;

use crate::application::{CanaryReport, CheckOutcome};

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of a successful issue when the JSON body mode is selected.
#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Per-carrier verification result.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    pub regular: CheckOutcome,
    pub signed: CheckOutcome,
    pub encrypted: CheckOutcome,
    pub session: CheckOutcome,
    pub all_matched: bool,
}

impl From<CanaryReport> for VerifyResponse {
    fn from(report: CanaryReport) -> Self {
        Self {
            all_matched: report.all_matched(),
            regular: report.regular,
            signed: report.signed,
            encrypted: report.encrypted,
            session: report.session,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_response_serializes_snake_case_outcomes() {
        let report = CanaryReport {
            regular: CheckOutcome::Matched,
            signed: CheckOutcome::Mismatched,
            encrypted: CheckOutcome::Missing,
            session: CheckOutcome::Matched,
        };

        let json = serde_json::to_value(VerifyResponse::from(report)).unwrap();

        assert_eq!(json["regular"], "matched");
        assert_eq!(json["signed"], "mismatched");
        assert_eq!(json["encrypted"], "missing");
        assert_eq!(json["all_matched"], false);
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let json = serde_json::to_value(ErrorResponse::new("CONFIG_MISSING", "boom")).unwrap();

        assert_eq!(json["error_code"], "CONFIG_MISSING");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn version_response_shape() {
        let json = serde_json::to_string(&VersionResponse {
            version: "7.1.3".to_string(),
        })
        .unwrap();

        assert_eq!(json, r#"{"version":"7.1.3"}"#);
    }
}
