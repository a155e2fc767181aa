//! Web server configuration.

use cse_core::auth::{TOKEN_LIFETIME_SECS, resolve_jwt_secret};

/// Configuration for the web server.
#[derive(Clone, Debug)]
pub struct WebConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5500").
    pub bind_addr: String,
    /// Session token signing secret.
    pub jwt_secret: String,
    /// Session lifetime in seconds; drives both token expiry and cookie max-age.
    pub session_lifetime_secs: i64,
    /// Local development mode: session cookies are sent without `Secure`.
    pub development: bool,
}

impl WebConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                              | Default                        |
    /// |---------------------------------------|--------------------------------|
    /// | `BIND_ADDR`                           | `127.0.0.1:5500`               |
    /// | `ACCESS_TOKEN_SECRET` / `JWT_SECRET`  | generated & persisted to file  |
    /// | `APP_DEV`                             | `false`                        |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5500".into()),
            jwt_secret: resolve_jwt_secret(),
            session_lifetime_secs: TOKEN_LIFETIME_SECS,
            development: std::env::var("APP_DEV")
                .is_ok_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        }
    }

    /// Whether session cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        !self.development
    }
}
