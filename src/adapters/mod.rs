//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum endpoints and cookie transport
//! - `session_store` - Session store implementations (in-memory, Redis)

pub mod http;
pub mod session_store;

pub use session_store::{InMemorySessionStore, RedisSessionStore};
