//! Canary handlers: issue, verify and clear.

mod clear_session;
mod issue_canary;
mod verify_canary;

pub use clear_session::{ClearSessionCommand, ClearSessionHandler};
pub use issue_canary::{CanaryIssued, IssueCanaryCommand, IssueCanaryHandler};
pub use verify_canary::{CanaryReport, CheckOutcome, VerifyCanaryHandler, VerifyCanaryQuery};

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::cookie::KeyMaterial;
    use crate::domain::session::SessionId;
    use crate::ports::{SessionStore, SessionStoreError};

    pub const TEST_SECRET: &[u8] = b"canary-handler-test-secret-key-base-0123456789";

    pub fn test_keys() -> KeyMaterial {
        KeyMaterial::derive(TEST_SECRET).unwrap()
    }

    /// Store that fails every call and counts how often it was hit.
    #[derive(Default)]
    pub struct UnavailableStore {
        pub calls: AtomicUsize,
    }

    impl UnavailableStore {
        fn fail(&self) -> SessionStoreError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SessionStoreError::Unavailable("connection refused".to_string())
        }
    }

    #[async_trait]
    impl SessionStore for UnavailableStore {
        async fn put(&self, _: &SessionId, _: &str, _: &[u8]) -> Result<(), SessionStoreError> {
            Err(self.fail())
        }

        async fn get(&self, _: &SessionId, _: &str) -> Result<Option<Vec<u8>>, SessionStoreError> {
            Err(self.fail())
        }

        async fn exists(&self, _: &SessionId) -> Result<bool, SessionStoreError> {
            Err(self.fail())
        }

        async fn clear(&self, _: &SessionId) -> Result<(), SessionStoreError> {
            Err(self.fail())
        }
    }
}
