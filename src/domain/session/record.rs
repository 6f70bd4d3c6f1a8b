//! Session record: a small key-value map with an expiry.

use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Expiry used when `now + ttl` is not representable: thirty years out.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Values stored under one session identifier.
///
/// Created on first write. Every write pushes the expiry out by the TTL.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    values: HashMap<String, Vec<u8>>,
    expires_at: Instant,
}

impl SessionRecord {
    /// Creates an empty record expiring `ttl` from now.
    pub fn new(ttl: Duration) -> Self {
        Self {
            values: HashMap::new(),
            expires_at: expiry_after(ttl),
        }
    }

    /// Upserts a value and refreshes the expiry.
    pub fn insert(&mut self, key: impl Into<String>, value: Vec<u8>, ttl: Duration) {
        self.values.insert(key.into(), value);
        self.expires_at = expiry_after(ttl);
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

fn expiry_after(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl).unwrap_or(now + FAR_FUTURE)
}
