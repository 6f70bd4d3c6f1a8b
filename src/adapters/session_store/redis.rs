//! Redis-backed session store for production deployments.
//!
//! Each session is a Redis hash under `<prefix>:<id>`, with
//! `canary:session` as the default prefix. Writes run
//! `HSET` and `EXPIRE` inside one MULTI/EXEC so the TTL is refreshed
//! atomically with the value.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::session::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Default namespace for session hashes.
const DEFAULT_KEY_PREFIX: &str = "canary:session";

/// Redis-backed session store for multi-server deployments.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl: Duration,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Create a new Redis session store.
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self {
            conn,
            ttl,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Namespace session hashes under `prefix` instead of the default.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Open a multiplexed connection to `url` and wrap it.
    ///
    /// # Errors
    /// Returns `SessionStoreError::Unavailable` if the URL is invalid or the
    /// server cannot be reached.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn, ttl))
    }

    fn record_key(&self, session_id: &SessionId) -> String {
        record_key(&self.key_prefix, session_id)
    }

    fn ttl_secs(&self) -> i64 {
        expire_secs(self.ttl)
    }
}

fn record_key(prefix: &str, session_id: &SessionId) -> String {
    format!("{}:{}", prefix, session_id)
}

/// `EXPIRE` argument for a TTL: at least one second, saturating at `i64::MAX`.
fn expire_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs().max(1)).unwrap_or(i64::MAX)
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(
        &self,
        session_id: &SessionId,
        key: &str,
        value: &[u8],
    ) -> Result<(), SessionStoreError> {
        let record_key = self.record_key(session_id);
        let mut conn = self.conn.clone();

        redis::pipe()
            .atomic()
            .hset(&record_key, key, value)
            .ignore()
            .expire(&record_key, self.ttl_secs())
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn get(
        &self,
        session_id: &SessionId,
        key: &str,
    ) -> Result<Option<Vec<u8>>, SessionStoreError> {
        let record_key = self.record_key(session_id);
        let mut conn = self.conn.clone();

        let value: Option<Vec<u8>> = conn.hget(&record_key, key).await.map_err(unavailable)?;
        Ok(value)
    }

    async fn exists(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        let record_key = self.record_key(session_id);
        let mut conn = self.conn.clone();

        let exists: bool = conn.exists(&record_key).await.map_err(unavailable)?;
        Ok(exists)
    }

    async fn clear(&self, session_id: &SessionId) -> Result<(), SessionStoreError> {
        let record_key = self.record_key(session_id);
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(&record_key).await.map_err(unavailable)?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl", &self.ttl)
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_is_namespaced() {
        let id = SessionId::generate();
        assert_eq!(
            record_key(DEFAULT_KEY_PREFIX, &id),
            format!("canary:session:{}", id)
        );
        assert_eq!(record_key("staging:canary", &id), format!("staging:canary:{}", id));
    }

    #[test]
    fn expire_secs_never_wraps_negative() {
        assert_eq!(expire_secs(Duration::from_secs(86_400)), 86_400);
        assert_eq!(expire_secs(Duration::from_millis(200)), 1);
        assert_eq!(expire_secs(Duration::from_secs(u64::MAX)), i64::MAX);
    }

    #[tokio::test]
    async fn connect_rejects_invalid_url() {
        let result = RedisSessionStore::connect("not-a-redis-url", Duration::from_secs(60)).await;
        assert!(matches!(result, Err(SessionStoreError::Unavailable(_))));
    }

    // Round-trip tests against a live server need a running Redis instance
    // and are run separately from unit tests.
}
