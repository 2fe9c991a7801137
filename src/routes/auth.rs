//! Auth routes — upstream-proxying login/session endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to these handlers; bearer tokens live in
//! HTTP-only cookies that page script cannot read. Handlers translate every
//! gateway failure into a JSON body with a safe message — no raw error
//! escapes to the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::credentials::{ACCESS_COOKIE, REFRESH_COOKIE, CookieCredentials, CookiePolicy, CredentialStore};
use crate::services::gateway::GatewayError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` — proxy credentials upstream; on success set the
/// access (and, when issued, refresh) cookie and return the user.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<AuthRequest>,
) -> Response {
    match state.gateway.login(&body.email, &body.password).await {
        Ok(grant) => {
            let secure = state.config.cookie_secure;
            let mut creds = CookieCredentials::new(jar);
            creds.set(ACCESS_COOKIE, grant.access_token, CookiePolicy::access(secure));
            if let Some(refresh) = grant.refresh_token {
                creds.set(REFRESH_COOKIE, refresh, CookiePolicy::refresh(secure));
            }
            (
                creds.into_jar(),
                Json(json!({ "message": "Login successful", "user": grant.user })),
            )
                .into_response()
        }
        Err(e) => gateway_failure(&e, "login"),
    }
}

/// `POST /auth/register` — forward to the upstream service. No cookie side
/// effects; the user logs in separately afterwards.
pub async fn register(State(state): State<AppState>, Json(body): Json<AuthRequest>) -> Response {
    match state.gateway.register(&body.email, &body.password).await {
        Ok(message) => Json(json!({ "message": message })).into_response(),
        Err(e) => gateway_failure(&e, "register"),
    }
}

/// `POST /auth/logout` — clear both cookies. Idempotent: succeeds even when
/// no session exists.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut creds = CookieCredentials::new(jar);

    // Best-effort upstream revocation; cookies are cleared regardless.
    if let Some(token) = creds.get(ACCESS_COOKIE) {
        if let Err(e) = state.gateway.logout(&token).await {
            tracing::warn!(error = %e, "upstream logout failed");
        }
    }

    creds.delete(ACCESS_COOKIE);
    creds.delete(REFRESH_COOKIE);
    (creds.into_jar(), Json(json!({ "message": "Logged out successfully" }))).into_response()
}

/// `POST /auth/refresh` — rotate the access cookie from the refresh cookie.
/// A failed refresh drops both cookies, forcing a full re-login.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut creds = CookieCredentials::new(jar);
    let Some(refresh_token) = creds.get(REFRESH_COOKIE) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "No refresh token found" })),
        )
            .into_response();
    };

    match state.gateway.refresh(&refresh_token).await {
        Ok(grant) => {
            let secure = state.config.cookie_secure;
            creds.set(ACCESS_COOKIE, grant.access_token, CookiePolicy::access(secure));
            if let Some(rotated) = grant.refresh_token {
                creds.set(REFRESH_COOKIE, rotated, CookiePolicy::refresh(secure));
            }
            (creds.into_jar(), Json(json!({ "message": "Token refreshed successfully" }))).into_response()
        }
        Err(e) => {
            creds.delete(ACCESS_COOKIE);
            creds.delete(REFRESH_COOKIE);
            (creds.into_jar(), gateway_failure(&e, "refresh")).into_response()
        }
    }
}

/// `GET /auth/status` — session probe used by the session client on mount.
/// No access cookie means anonymous; no upstream call is made.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Response {
    let mut creds = CookieCredentials::new(jar);
    let Some(access_token) = creds.get(ACCESS_COOKIE) else {
        return Json(json!({ "isAuthenticated": false })).into_response();
    };

    match state.gateway.current_user(&access_token).await {
        Ok(user) => Json(json!({ "isAuthenticated": true, "user": user })).into_response(),
        Err(e) => {
            // Stale or rejected token: drop it so the next probe is a clean miss.
            creds.delete(ACCESS_COOKIE);
            let code = match &e {
                GatewayError::Upstream { .. } => StatusCode::UNAUTHORIZED,
                _ => {
                    tracing::error!(error = %e, "status probe failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (code, creds.into_jar(), Json(json!({ "isAuthenticated": false }))).into_response()
        }
    }
}

/// Map a gateway failure to a browser-safe JSON response. Upstream statuses
/// and messages pass through; everything else becomes a logged generic 500.
fn gateway_failure(error: &GatewayError, operation: &'static str) -> Response {
    match error {
        GatewayError::Upstream { status, message } => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, Json(json!({ "message": message }))).into_response()
        }
        GatewayError::Connectivity(_) | GatewayError::Decode(_) | GatewayError::ClientBuild(_) => {
            tracing::error!(error = %error, operation, "auth backend call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal server error" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
