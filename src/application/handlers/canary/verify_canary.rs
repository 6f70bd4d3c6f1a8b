//! VerifyCanaryHandler - Query handler that checks presented cookies.
//!
//! Decodes the cookies a client sends back and compares each one, plus the
//! stored session value, with the configured canary.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::canary::{CanaryError, CanaryValue, SESSION_KEY};
use crate::domain::cookie::{decode, KeyMaterial, ProtectionMode};
use crate::domain::session::SessionId;
use crate::ports::SessionStore;

/// Query carrying the wire values presented by the client.
#[derive(Debug, Clone, Default)]
pub struct VerifyCanaryQuery {
    /// Wire values keyed by the mode of the cookie they came from.
    pub wire_values: HashMap<ProtectionMode, Vec<u8>>,
    pub session_id: Option<SessionId>,
}

/// Outcome of checking one carrier of the canary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Matched,
    Mismatched,
    Missing,
}

impl CheckOutcome {
    fn compare(canary: &CanaryValue, value: Option<&[u8]>) -> Self {
        match value {
            Some(value) if canary.matches(value) => CheckOutcome::Matched,
            Some(_) => CheckOutcome::Mismatched,
            None => CheckOutcome::Missing,
        }
    }
}

/// Per-carrier verification report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanaryReport {
    pub regular: CheckOutcome,
    pub signed: CheckOutcome,
    pub encrypted: CheckOutcome,
    pub session: CheckOutcome,
}

impl CanaryReport {
    pub fn all_matched(&self) -> bool {
        [self.regular, self.signed, self.encrypted, self.session]
            .iter()
            .all(|outcome| *outcome == CheckOutcome::Matched)
    }
}

/// Handler for verifying presented cookies.
pub struct VerifyCanaryHandler {
    store: Arc<dyn SessionStore>,
    keys: Arc<KeyMaterial>,
    canary: Option<CanaryValue>,
}

impl VerifyCanaryHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        keys: Arc<KeyMaterial>,
        canary: Option<CanaryValue>,
    ) -> Self {
        Self {
            store,
            keys,
            canary,
        }
    }

    pub async fn handle(&self, query: VerifyCanaryQuery) -> Result<CanaryReport, CanaryError> {
        let canary = self
            .canary
            .as_ref()
            .ok_or(CanaryError::ConfigMissing("CANARY_VALUE"))?;

        let regular = self.check_cookie(canary, &query, ProtectionMode::Plain)?;
        let signed = self.check_cookie(canary, &query, ProtectionMode::Signed)?;
        let encrypted = self.check_cookie(canary, &query, ProtectionMode::Encrypted)?;

        let stored = match &query.session_id {
            Some(session_id) => self.store.get(session_id, SESSION_KEY).await?,
            None => None,
        };
        let session = CheckOutcome::compare(canary, stored.as_deref());

        Ok(CanaryReport {
            regular,
            signed,
            encrypted,
            session,
        })
    }

    fn check_cookie(
        &self,
        canary: &CanaryValue,
        query: &VerifyCanaryQuery,
        mode: ProtectionMode,
    ) -> Result<CheckOutcome, CanaryError> {
        let Some(wire) = query.wire_values.get(&mode) else {
            return Ok(CheckOutcome::Missing);
        };

        let raw = decode(mode, wire, &self.keys).map_err(|e| {
            tracing::warn!(cookie = mode.cookie_name(), error = %e, "Cookie failed verification");
            CanaryError::integrity(mode.cookie_name(), e)
        })?;

        Ok(CheckOutcome::compare(canary, Some(&raw)))
    }
}
