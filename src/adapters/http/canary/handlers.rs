//! HTTP handlers for canary endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::cookies::{parse_cookie_header, CookiePolicy};
use crate::application::{
    CanaryIssued, ClearSessionCommand, ClearSessionHandler, IssueCanaryCommand,
    IssueCanaryHandler, VerifyCanaryHandler, VerifyCanaryQuery,
};
use crate::config::ResponseBody;
use crate::domain::canary::{CanaryError, CanaryValue};
use crate::domain::cookie::{KeyMaterial, ProtectionMode};
use crate::domain::session::SessionId;
use crate::ports::SessionStore;

use super::dto::{ErrorResponse, VerifyResponse, VersionResponse};

/// Seconds a client should wait before retrying after a store outage.
const RETRY_AFTER_SECS: &str = "1";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CanaryAppState {
    issue_handler: Arc<IssueCanaryHandler>,
    verify_handler: Arc<VerifyCanaryHandler>,
    clear_handler: Arc<ClearSessionHandler>,
    cookie_policy: Arc<CookiePolicy>,
    response_body: ResponseBody,
    version: Arc<str>,
}

impl CanaryAppState {
    /// Wires all canary handlers to one store, key set and canary value.
    pub fn new(
        store: Arc<dyn SessionStore>,
        keys: Arc<KeyMaterial>,
        canary: Option<CanaryValue>,
    ) -> Self {
        Self {
            issue_handler: Arc::new(IssueCanaryHandler::new(
                store.clone(),
                keys.clone(),
                canary.clone(),
            )),
            verify_handler: Arc::new(VerifyCanaryHandler::new(store.clone(), keys, canary)),
            clear_handler: Arc::new(ClearSessionHandler::new(store)),
            cookie_policy: Arc::new(CookiePolicy::default()),
            response_body: ResponseBody::default(),
            version: Arc::from(env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_cookie_policy(mut self, policy: CookiePolicy) -> Self {
        self.cookie_policy = Arc::new(policy);
        self
    }

    pub fn with_response_body(mut self, body: ResponseBody) -> Self {
        self.response_body = body;
        self
    }

    pub fn with_version(mut self, version: impl AsRef<str>) -> Self {
        self.version = Arc::from(version.as_ref());
        self
    }

    /// Session id from the inbound session cookie, if well-formed.
    fn presented_session(&self, cookies: &HashMap<String, Vec<u8>>) -> Option<SessionId> {
        cookies
            .get(&self.cookie_policy.session_cookie_name)
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .and_then(|raw| raw.parse().ok())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / and GET /cookies_monster - Issue the canary cookies
pub async fn issue_canary(State(state): State<CanaryAppState>, headers: HeaderMap) -> Response {
    let cookies = parse_cookie_header(&headers);
    let cmd = IssueCanaryCommand {
        session_id: state.presented_session(&cookies),
    };

    match state.issue_handler.handle(cmd).await {
        Ok(issued) => issued_response(&state, issued),
        Err(e) => handle_canary_error(e),
    }
}

/// GET /cookies_monster/verify - Check presented cookies against the canary
pub async fn verify_canary(State(state): State<CanaryAppState>, headers: HeaderMap) -> Response {
    let cookies = parse_cookie_header(&headers);
    let wire_values = ProtectionMode::ALL
        .iter()
        .filter_map(|mode| {
            cookies
                .get(mode.cookie_name())
                .map(|wire| (*mode, wire.clone()))
        })
        .collect();
    let query = VerifyCanaryQuery {
        wire_values,
        session_id: state.presented_session(&cookies),
    };

    match state.verify_handler.handle(query).await {
        Ok(report) => (StatusCode::OK, Json(VerifyResponse::from(report))).into_response(),
        Err(e) => handle_canary_error(e),
    }
}

/// DELETE /cookies_monster/session - Clear the caller's session
pub async fn clear_session(State(state): State<CanaryAppState>, headers: HeaderMap) -> Response {
    let cookies = parse_cookie_header(&headers);
    let cmd = ClearSessionCommand {
        session_id: state.presented_session(&cookies),
    };

    match state.clear_handler.handle(cmd).await {
        Ok(()) => with_set_cookies(
            StatusCode::NO_CONTENT.into_response(),
            vec![state.cookie_policy.expired_session_cookie()],
        ),
        Err(e) => handle_canary_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response building
// ════════════════════════════════════════════════════════════════════════════

fn issued_response(state: &CanaryAppState, issued: CanaryIssued) -> Response {
    let policy = &state.cookie_policy;
    let mut set_cookies: Vec<String> = issued
        .cookies
        .iter()
        .map(|cookie| policy.set_cookie(cookie.name(), cookie.wire_value()))
        .collect();
    if issued.session_minted {
        set_cookies.push(policy.session_cookie(issued.session_id.as_str()));
    }

    let body = match state.response_body {
        ResponseBody::Empty => StatusCode::OK.into_response(),
        ResponseBody::VersionJson => (
            StatusCode::OK,
            Json(VersionResponse {
                version: state.version.to_string(),
            }),
        )
            .into_response(),
    };

    with_set_cookies(body, set_cookies)
}

/// Appends `Set-Cookie` lines, or fails the whole response if any line is
/// not a valid header value.
fn with_set_cookies(mut response: Response, set_cookies: Vec<String>) -> Response {
    let mut values = Vec::with_capacity(set_cookies.len());
    for line in set_cookies {
        match HeaderValue::from_str(&line) {
            Ok(value) => values.push(value),
            Err(e) => {
                tracing::error!(error = %e, "Refusing to emit malformed Set-Cookie header");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal("Failed to encode cookies")),
                )
                    .into_response();
            }
        }
    }

    let headers = response.headers_mut();
    for value in values {
        headers.append(header::SET_COOKIE, value);
    }
    response
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_canary_error(error: CanaryError) -> Response {
    let status = error.status_code();
    let message = match &error {
        CanaryError::ConfigMissing(_) => {
            tracing::error!(error = %error, "Canary endpoint is not configured");
            error.to_string()
        }
        CanaryError::Integrity { .. } => error.to_string(),
        CanaryError::StoreUnavailable(reason) => {
            tracing::warn!(reason = %reason, "Session store unavailable");
            "Session store unavailable".to_string()
        }
    };

    let mut response = (status, Json(ErrorResponse::new(error.code(), message))).into_response();
    if error.is_retryable() {
        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from_static(RETRY_AFTER_SECS),
        );
    }
    response
}
