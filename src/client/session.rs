//! Client-side session management.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` is the single source of truth for "who is logged in"
//! inside one UI process. It is constructed once at the application root and
//! cloned into consumers; all clones share state. Truth about session
//! validity lives in the server-held cookies — this state machine is a
//! cache of that truth, resynchronized by `initialize` on mount.
//!
//! TRADE-OFFS
//! ==========
//! Refresh attempts are not deduplicated across manager instances (or
//! browser tabs): each one detects expiry and refreshes independently.
//! Token rotation upstream tolerates this race, so no single-flight
//! coordination is attempted.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::env_parse;
use crate::models::User;

use super::notify::Notify;

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 900;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The silent refresh failed while retrying an authorized request.
    #[error("session expired")]
    Expired,

    /// Transport-level failure talking to the auth frontend.
    #[error("request failed: {0}")]
    Http(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Point-in-time view of the session state machine.
///
/// Invariant: `is_authenticated` implies `user` is present. `loading` is
/// only true while an initialization, login, or registration call is in
/// flight.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    #[serde(rename = "isAuthenticated")]
    is_authenticated: bool,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    user: User,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

/// Session state machine plus the authenticated request wrapper.
#[derive(Clone)]
pub struct SessionManager {
    http: reqwest::Client,
    base_url: String,
    notifier: Arc<dyn Notify>,
    state: Arc<Mutex<SessionSnapshot>>,
}

impl SessionManager {
    /// Build a manager talking to the auth frontend at `base_url`. Cookies
    /// are handled by the client's jar, mirroring a browser's
    /// `credentials: include`.
    pub fn new(base_url: &str, notifier: Arc<dyn Notify>) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| SessionError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            notifier,
            state: Arc::new(Mutex::new(SessionSnapshot { user: None, is_authenticated: false, loading: true })),
        })
    }

    /// Current state; cheap copy, callers never hold the lock.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, user: Option<User>, is_authenticated: bool, loading: bool) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *state = SessionSnapshot { user, is_authenticated, loading };
    }

    fn set_loading(&self, loading: bool) {
        let mut state = self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.loading = loading;
    }

    fn clear_session(&self) {
        self.set_state(None, false, false);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Resynchronize with the server-held session on mount.
    ///
    /// Goes through the wrapper so an expired access token gets one silent
    /// refresh before the user is declared anonymous.
    pub async fn initialize(&self) {
        self.set_loading(true);

        let user = match self.request(Method::GET, "/auth/status", None).await {
            Ok(response) if response.status().is_success() => match response.json::<StatusBody>().await {
                Ok(body) if body.is_authenticated => body.user,
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "status payload rejected");
                    None
                }
            },
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "status check failed");
                None
            }
        };

        match user {
            Some(user) => self.set_state(Some(user), true, false),
            None => self.set_state(None, false, false),
        }
    }

    /// Returns `true` when a session was established.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.set_loading(true);

        let result = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await;

        let failure = match result {
            Ok(response) if response.status().is_success() => match response.json::<LoginBody>().await {
                Ok(body) => {
                    self.set_state(Some(body.user), true, false);
                    self.notifier.success("Login successful");
                    return true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "login payload rejected");
                    "Login failed".to_owned()
                }
            },
            Ok(response) => read_message(response).await.unwrap_or_else(|| "Login failed".to_owned()),
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                "Login failed".to_owned()
            }
        };

        self.set_loading(false);
        self.notifier.error(&failure);
        false
    }

    /// Returns `true` on success. Registration does not establish a
    /// session; the user logs in separately afterwards.
    pub async fn register(&self, email: &str, password: &str) -> bool {
        self.set_loading(true);

        let result = self
            .http
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await;

        let failure = match result {
            Ok(response) if response.status().is_success() => {
                self.set_loading(false);
                self.notifier.success("Registration successful! Please log in.");
                return true;
            }
            Ok(response) => read_message(response).await.unwrap_or_else(|| "Registration failed".to_owned()),
            Err(e) => {
                tracing::warn!(error = %e, "register request failed");
                "Registration failed".to_owned()
            }
        };

        self.set_loading(false);
        self.notifier.error(&failure);
        false
    }

    /// Best-effort server logout, unconditional local logout.
    pub async fn logout(&self) {
        if let Err(e) = self.request(Method::POST, "/auth/logout", None).await {
            tracing::warn!(error = %e, "logout request failed");
        }
        self.clear_session();
        self.notifier.success("Logged out successfully");
    }

    /// Authenticated request with one silent refresh-and-retry on 401.
    ///
    /// At most two calls reach `path` and at most one reaches the refresh
    /// endpoint per invocation. A failed refresh clears local state and
    /// fails with [`SessionError::Expired`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, SessionError> {
        let response = self.send(method.clone(), path, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let refreshed = self.http.post(self.url("/auth/refresh")).send().await;
        match refreshed {
            Ok(r) if r.status().is_success() => self.send(method, path, body).await,
            _ => {
                self.clear_session();
                self.notifier.error("Session expired. Please log in again.");
                Err(SessionError::Expired)
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, SessionError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(|e| SessionError::Http(e.to_string()))
    }
}

async fn read_message(response: reqwest::Response) -> Option<String> {
    response.json::<MessageBody>().await.ok().and_then(|body| body.message)
}

// =============================================================================
// PERIODIC REFRESH
// =============================================================================

/// Spawn the periodic silent-refresh task. Returns a handle for shutdown.
///
/// While a session is active the task rotates the access token in the
/// background (`SESSION_REFRESH_INTERVAL_SECS`, default 15 minutes); a
/// rejected refresh demotes the session to anonymous. Transient transport
/// failures are logged and retried on the next tick.
pub fn spawn_refresh_task(manager: SessionManager) -> JoinHandle<()> {
    let interval_secs = env_parse("SESSION_REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS);
    tracing::info!(interval_secs, "session refresh task configured");
    spawn_refresh_task_every(manager, Duration::from_secs(interval_secs))
}

fn spawn_refresh_task_every(manager: SessionManager, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick fires immediately; initialization already synced.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if !manager.snapshot().is_authenticated {
                continue;
            }

            match manager.http.post(manager.url("/auth/refresh")).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    tracing::warn!(status = %response.status(), "periodic refresh rejected; dropping session");
                    manager.clear_session();
                }
                Err(e) => tracing::warn!(error = %e, "periodic refresh failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
