//! Canary domain: the known marker value and the errors around issuing it.

mod errors;
mod value;

pub use errors::CanaryError;
pub use value::CanaryValue;

/// Session key under which the canary is stored.
pub const SESSION_KEY: &str = "session";
