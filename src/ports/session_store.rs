//! Session Store Port - Interface for server-side session records.
//!
//! Maps an opaque session identifier to a small key-value record.
//! Implementations can use in-memory storage for testing or Redis for
//! production.

use async_trait::async_trait;

use crate::domain::session::SessionId;

/// Errors that can occur during session store operations.
///
/// An absent key is not an error; `get` returns `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for reading and writing session records.
///
/// Implementations must be thread-safe. Concurrent writes to the same
/// session resolve as last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Upsert `value` under `key` in the record for `session_id`.
    ///
    /// Creates the record if absent and refreshes its lifetime.
    ///
    /// # Errors
    /// Returns `SessionStoreError::Unavailable` if the backing store fails
    async fn put(
        &self,
        session_id: &SessionId,
        key: &str,
        value: &[u8],
    ) -> Result<(), SessionStoreError>;

    /// Read the value under `key` for `session_id`.
    ///
    /// # Returns
    /// `None` if the record or the key is absent or the record expired
    ///
    /// # Errors
    /// Returns `SessionStoreError::Unavailable` if the backing store fails
    async fn get(
        &self,
        session_id: &SessionId,
        key: &str,
    ) -> Result<Option<Vec<u8>>, SessionStoreError>;

    /// Check if a live record exists for `session_id`.
    async fn exists(&self, session_id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Destroy the record for `session_id`. No error if it is absent.
    async fn clear(&self, session_id: &SessionId) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_error_message() {
        let err = SessionStoreError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }
}
