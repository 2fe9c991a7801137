//! Service configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROTECTED_PREFIXES: &str = "/me,/races,/bets";
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },

    /// An environment variable is set but could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Typed service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream auth service, without a trailing slash.
    pub backend_base_url: String,
    pub port: u16,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Path prefixes gated by the route guard.
    pub protected_prefixes: Vec<String>,
    /// Whether the guard also validates tokens upstream (not just presence).
    pub guard_validates_tokens: bool,
    pub timeouts: BackendTimeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `BACKEND_BASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: default inferred from `PUBLIC_BASE_URL` scheme
    /// - `PROTECTED_ROUTE_PREFIXES`: comma-separated, default `/me,/races,/bets`
    /// - `GUARD_VALIDATE_TOKENS`: default true
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_base_url = std::env::var("BACKEND_BASE_URL")
            .map_err(|_| ConfigError::MissingVar { var: "BACKEND_BASE_URL" })?
            .trim_end_matches('/')
            .to_string();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Parse(format!("invalid PORT: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };

        let prefixes_raw = std::env::var("PROTECTED_ROUTE_PREFIXES")
            .unwrap_or_else(|_| DEFAULT_PROTECTED_PREFIXES.to_string());

        Ok(Self {
            backend_base_url,
            port,
            cookie_secure: cookie_secure(),
            protected_prefixes: parse_prefixes(&prefixes_raw),
            guard_validates_tokens: env_bool("GUARD_VALIDATE_TOKENS").unwrap_or(true),
            timeouts: BackendTimeouts {
                request_secs: env_parse("BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// `COOKIE_SECURE` override, else infer from the public origin scheme.
pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_BASE_URL")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

/// Split a comma-separated prefix list, dropping empty entries.
pub(crate) fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
