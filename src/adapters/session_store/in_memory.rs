//! In-Memory Session Store Adapter
//!
//! Stores session records in memory with a fixed TTL.
//! Useful for testing and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::time::{self, MissedTickBehavior};

use crate::domain::session::{SessionId, SessionRecord};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for session records.
///
/// Writers are serialized by the lock, so concurrent puts to the same
/// session resolve as last-write-wins. Expired records read as absent, are
/// replaced on the next write to the same id, and are dropped by
/// [`purge_expired`](Self::purge_expired) or the
/// [`run_purge_loop`](Self::run_purge_loop) sweeper.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// Create a new in-memory store whose records live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Drop every expired record, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        before - records.len()
    }

    /// Sweep expired records every `period` until shutdown is signalled.
    ///
    /// Runs one last sweep before returning.
    pub async fn run_purge_loop(&self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.purge_expired().await;
                        return;
                    }
                }

                _ = interval.tick() => {
                    let removed = self.purge_expired().await;
                    if removed > 0 {
                        tracing::debug!(removed, "Purged expired sessions");
                    }
                }
            }
        }
    }

    /// Get the number of stored records, expired ones included.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(
        &self,
        session_id: &SessionId,
        key: &str,
        value: &[u8],
    ) -> Result<(), SessionStoreError> {
        let mut records = self.records.write().await;
        let record = records
            .entry(session_id.clone())
            .or_insert_with(|| SessionRecord::new(self.ttl));
        if record.is_expired() {
            *record = SessionRecord::new(self.ttl);
        }
        record.insert(key, value.to_vec(), self.ttl);
        Ok(())
    }

    async fn get(
        &self,
        session_id: &SessionId,
        key: &str,
    ) -> Result<Option<Vec<u8>>, SessionStoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(session_id)
            .filter(|record| !record.is_expired())
            .and_then(|record| record.get(key))
            .map(<[u8]>::to_vec))
    }

    async fn exists(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(session_id)
            .is_some_and(|record| !record.is_expired()))
    }

    async fn clear(&self, session_id: &SessionId) -> Result<(), SessionStoreError> {
        self.records.write().await.remove(session_id);
        Ok(())
    }
}
