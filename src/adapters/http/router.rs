//! Application router: canary routes plus request tracing and timeouts.

use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::canary::{canary_router, CanaryAppState};

/// Builds the full application router.
///
/// Requests exceeding `request_timeout` get `408 Request Timeout`.
pub fn app_router(state: CanaryAppState, request_timeout: Duration) -> Router {
    canary_router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
