//! HTTP routes for canary endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{clear_session, issue_canary, verify_canary, CanaryAppState};

/// Creates the canary router with all endpoints.
///
/// The canary is served at both `/` and `/cookies_monster`.
pub fn canary_router(state: CanaryAppState) -> Router {
    Router::new()
        .route("/", get(issue_canary))
        .route("/cookies_monster", get(issue_canary))
        .route("/cookies_monster/verify", get(verify_canary))
        .route("/cookies_monster/session", delete(clear_session))
        .with_state(state)
}
