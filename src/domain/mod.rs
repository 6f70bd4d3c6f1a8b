//! Domain layer containing the cookie protection logic and domain types.
//!
//! # Module Organization
//!
//! - `cookie` - Protection modes, key material and the pure cookie codec
//! - `session` - Session identifiers and server-side session records
//! - `canary` - The canary value and the canary error taxonomy

pub mod canary;
pub mod cookie;
pub mod session;
