//! Session Store Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Records in process memory (testing/single server)
//! - **RedisSessionStore** - One Redis hash per session (production/multi server)
//!
//! ## Usage
//!
//! ```ignore
//! use cookie_canary::adapters::session_store::{InMemorySessionStore, RedisSessionStore};
//!
//! // Testing: in-memory storage
//! let store = InMemorySessionStore::new(Duration::from_secs(3600));
//!
//! // Production: Redis
//! let store = RedisSessionStore::new(conn, Duration::from_secs(3600));
//! ```

mod in_memory;
mod redis;

pub use in_memory::InMemorySessionStore;
pub use redis::RedisSessionStore;
