//! HTTP adapter for canary endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, VerifyResponse, VersionResponse};
pub use handlers::CanaryAppState;
pub use routes::canary_router;
