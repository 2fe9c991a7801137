//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the auth endpoints, the route guard, and the ambient CORS/trace
//! layers into a single Axum router. The prebuilt web frontend is served as
//! static files behind the guard, so protected pages are never rendered
//! without a session cookie.

pub mod auth;
pub mod guard;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the directory holding the prebuilt web frontend.
fn site_dir() -> PathBuf {
    std::env::var("SITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("site"))
}

/// Build the full application router.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let site_service = ServeDir::new(site_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/status", get(auth::status))
        .route("/healthz", get(healthz))
        .fallback_service(site_service)
        .layer(middleware::from_fn_with_state(state.clone(), guard::require_session))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
