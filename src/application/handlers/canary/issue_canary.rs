//! IssueCanaryHandler - Command handler for the canary endpoint.
//!
//! Seals the canary under every protection mode and stores it in the
//! caller's session. All-or-nothing: on any failure no cookie is issued.

use std::sync::Arc;

use crate::domain::canary::{CanaryError, CanaryValue, SESSION_KEY};
use crate::domain::cookie::{KeyMaterial, ProtectedCookie, ProtectionMode};
use crate::domain::session::SessionId;
use crate::ports::SessionStore;

/// Command to issue the canary.
#[derive(Debug, Clone, Default)]
pub struct IssueCanaryCommand {
    /// Session identifier presented by the client, if any.
    pub session_id: Option<SessionId>,
}

/// Result of a successful issue.
#[derive(Debug, Clone)]
pub struct CanaryIssued {
    /// One cookie per protection mode, in [`ProtectionMode::ALL`] order.
    pub cookies: Vec<ProtectedCookie>,
    pub session_id: SessionId,
    /// True when the session id was minted by this call.
    pub session_minted: bool,
}

/// Handler for issuing the canary.
pub struct IssueCanaryHandler {
    store: Arc<dyn SessionStore>,
    keys: Arc<KeyMaterial>,
    canary: Option<CanaryValue>,
}

impl IssueCanaryHandler {
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

    pub async fn handle(&self, cmd: IssueCanaryCommand) -> Result<CanaryIssued, CanaryError> {
        // 1. Canary must be configured
        let canary = self
            .canary
            .as_ref()
            .ok_or(CanaryError::ConfigMissing("CANARY_VALUE"))?;

        // 2. Resolve or mint the session
        let (session_id, session_minted) = self.resolve_session(cmd.session_id).await?;

        // 3. Seal the canary under every mode
        let cookies: Vec<ProtectedCookie> = ProtectionMode::ALL
            .iter()
            .map(|mode| ProtectedCookie::seal(*mode, canary.as_bytes(), &self.keys))
            .collect();

        // 4. Store the session value; failure discards the sealed cookies
        self.store
            .put(&session_id, SESSION_KEY, canary.as_bytes())
            .await?;

        tracing::info!(
            session_minted,
            cookies = cookies.len(),
            "Issued canary"
        );

        Ok(CanaryIssued {
            cookies,
            session_id,
            session_minted,
        })
    }

    /// Reuses the presented session only if the store still holds it.
    async fn resolve_session(
        &self,
        presented: Option<SessionId>,
    ) -> Result<(SessionId, bool), CanaryError> {
        if let Some(session_id) = presented {
            if self.store.exists(&session_id).await? {
                tracing::debug!("Reusing existing session");
                return Ok((session_id, false));
            }
            tracing::debug!("Presented session unknown, minting a new one");
        }
        Ok((SessionId::generate(), true))
    }
}
