//! Authentication logic.
//!
//! Provides password hashing and the session token issuer/verifier shared by
//! the web layer and the server binary.

pub mod jwt;
pub mod password;

pub use jwt::{TOKEN_LIFETIME_SECS, TokenIssuer, resolve_jwt_secret};

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed, tampered or expired token. Callers treat every variant of
    /// verification failure the same way.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password hashing error: {0}")]
    Hash(String),
}
