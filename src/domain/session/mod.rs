//! Server-side session domain.

mod record;
mod session_id;

pub use record::SessionRecord;
pub use session_id::{ParseSessionIdError, SessionId};

/// Default name of the session identifier cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "_canary_session";
