//! HTTP adapters - REST API implementations.
//!
//! `canary` exposes the endpoints, `cookies` owns cookie transport and
//! `router` adds the request layers.

pub mod canary;
pub mod cookies;
pub mod router;

// Re-export key types for convenience
pub use canary::canary_router;
pub use canary::CanaryAppState;
pub use cookies::{CookiePolicy, DEFAULT_SESSION_COOKIE};
pub use router::app_router;
