//! Route guard — credential check ahead of protected page rendering.
//!
//! DESIGN
//! ======
//! The decision logic is plain functions over headers + config so tests can
//! exercise it without middleware plumbing; the middleware itself is a thin
//! adapter. Blocked requests are redirected to the login page carrying the
//! original path as a return target — no protected content is served
//! without a present (and, in the validating variant, accepted) credential.

use std::fmt::Write;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::credentials::ACCESS_COOKIE;
use crate::state::AppState;

/// Middleware wrapping the whole router.
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(blocked) = guard_decision(&state, request.headers(), request.uri().path()).await {
        return blocked;
    }
    next.run(request).await
}

/// Returns the redirect response for a blocked request, `None` to pass.
pub(crate) async fn guard_decision(state: &AppState, headers: &HeaderMap, path: &str) -> Option<Response> {
    if !is_protected(path, &state.config.protected_prefixes) {
        return None;
    }

    let jar = CookieJar::from_headers(headers);
    let token = jar.get(ACCESS_COOKIE).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return Some(login_redirect(path));
    }

    if state.config.guard_validates_tokens {
        if let Err(e) = state.gateway.validate_token(token).await {
            tracing::warn!(error = %e, path, "token rejected by guard");
            return Some(login_redirect(path));
        }
    }

    None
}

pub(crate) fn is_protected(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

/// Build the login redirect carrying the original path as a return target.
pub(crate) fn login_redirect(path: &str) -> Response {
    Redirect::temporary(&format!("/login?redirect={}", encode_query_value(path))).into_response()
}

/// Percent-encode the characters that would corrupt a query value. Slashes
/// stay literal so the target remains readable.
pub(crate) fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => out.push(b as char),
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
