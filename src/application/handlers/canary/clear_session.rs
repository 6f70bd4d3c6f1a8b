//! ClearSessionHandler - Command handler for explicit session clearing.

use std::sync::Arc;

use crate::domain::canary::CanaryError;
use crate::domain::session::SessionId;
use crate::ports::SessionStore;

/// Command to clear the caller's session.
#[derive(Debug, Clone, Default)]
pub struct ClearSessionCommand {
    pub session_id: Option<SessionId>,
}

/// Handler for clearing a session record. Idempotent.
pub struct ClearSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl ClearSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ClearSessionCommand) -> Result<(), CanaryError> {
        let Some(session_id) = cmd.session_id else {
            return Ok(());
        };

        self.store.clear(&session_id).await?;
        tracing::info!("Cleared session");

        Ok(())
    }
}
