//! Credential slots behind the [`CredentialStore`] trait.
//!
//! DESIGN
//! ======
//! Route handlers read and write the two logical token slots through this
//! trait instead of touching cookies directly: production uses the
//! cookie-jar adapter, unit tests an in-memory map. Tokens are HTTP-only —
//! page script can only infer their presence through the session client.

use std::collections::HashMap;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

pub const ACCESS_MAX_AGE: Duration = Duration::days(7);
pub const REFRESH_MAX_AGE: Duration = Duration::days(30);

/// Attributes applied when a credential slot is written.
///
/// `HttpOnly`, `SameSite=Strict` and `Path=/` are fixed; only lifetime and
/// the `Secure` flag vary by slot and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub max_age: Duration,
    pub secure: bool,
}

impl CookiePolicy {
    #[must_use]
    pub fn access(secure: bool) -> Self {
        Self { max_age: ACCESS_MAX_AGE, secure }
    }

    #[must_use]
    pub fn refresh(secure: bool) -> Self {
        Self { max_age: REFRESH_MAX_AGE, secure }
    }
}

pub trait CredentialStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: String, policy: CookiePolicy);
    fn delete(&mut self, name: &str);
}

// =============================================================================
// COOKIE-BACKED STORE
// =============================================================================

/// Production store: wraps the request jar and accumulates response cookies.
pub struct CookieCredentials {
    jar: CookieJar,
}

impl CookieCredentials {
    #[must_use]
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// Hand the accumulated jar back for the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl CredentialStore for CookieCredentials {
    fn get(&self, name: &str) -> Option<String> {
        self.jar
            .get(name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn set(&mut self, name: &str, value: String, policy: CookiePolicy) {
        let cookie = Cookie::build((name.to_owned(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(policy.secure)
            .max_age(policy.max_age);
        self.jar = self.jar.clone().add(cookie);
    }

    fn delete(&mut self, name: &str) {
        let cookie = Cookie::build((name.to_owned(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .max_age(Duration::ZERO);
        self.jar = self.jar.clone().add(cookie);
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory store used as the test stand-in for the cookie jar.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    values: HashMap<String, String>,
}

impl MemoryCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentials {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: String, _policy: CookiePolicy) {
        self.values.insert(name.to_owned(), value);
    }

    fn delete(&mut self, name: &str) {
        self.values.remove(name);
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
