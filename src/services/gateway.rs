//! Upstream auth service client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route handlers never talk to the game backend directly; every outbound
//! call goes through [`AuthGateway`] so handler tests can substitute a
//! scripted implementation. Each operation is one HTTP call with no side
//! effects beyond the network — cookie writes stay in the route layer.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::models::User;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The upstream service could not be reached (DNS, connect, timeout).
    #[error("auth backend unreachable: {0}")]
    Connectivity(String),

    /// The upstream service answered with a non-2xx status.
    #[error("auth backend returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// A 2xx response body did not match the expected shape.
    #[error("auth backend response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Tokens and profile issued by a successful upstream login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Rotated tokens from an upstream refresh. The refresh slot only rotates
/// when the backend issues a replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "newRefreshToken", default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Outbound operations against the upstream auth service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, GatewayError>;
    async fn register(&self, email: &str, password: &str) -> Result<String, GatewayError>;
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, GatewayError>;
    async fn current_user(&self, access_token: &str) -> Result<User, GatewayError>;
    async fn validate_token(&self, access_token: &str) -> Result<(), GatewayError>;
    async fn logout(&self, access_token: &str) -> Result<(), GatewayError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Build the production gateway from service config.
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GatewayError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url: config.backend_base_url.clone() })
    }

    #[cfg(test)]
    pub(crate) fn for_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a non-2xx response, preferring the backend's `{message}` body.
    async fn upstream_error(response: reqwest::Response, fallback: &str) -> GatewayError {
        let status = response.status().as_u16();
        let message = response
            .json::<MessageBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_owned());
        GatewayError::Upstream { status, message }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, GatewayError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Authentication failed").await);
        }
        Self::decode(response).await
    }

    async fn register(&self, email: &str, password: &str) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Registration failed").await);
        }

        let body: MessageBody = Self::decode(response).await?;
        Ok(body.message.unwrap_or_else(|| "Registration successful".to_owned()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, GatewayError> {
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Failed to refresh token").await);
        }
        Self::decode(response).await
    }

    async fn current_user(&self, access_token: &str) -> Result<User, GatewayError> {
        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Invalid session").await);
        }
        Self::decode(response).await
    }

    async fn validate_token(&self, access_token: &str) -> Result<(), GatewayError> {
        let response = self
            .http
            .get(self.url("/auth/validate-token"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Token validation failed").await);
        }
        Ok(())
    }

    async fn logout(&self, access_token: &str) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response, "Logout failed").await);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
