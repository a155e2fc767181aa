//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying an [`Identity`]. All lifetimes are in
//! seconds: the same value drives the `exp` claim and the cookie max-age.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{debug, info};

use super::AuthError;
use crate::models::{Account, Identity};

/// Session token lifetime: one hour.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Signs and verifies session tokens with a server secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: i64,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Creates an issuer with the default one hour lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_lifetime(secret, TOKEN_LIFETIME_SECS)
    }

    pub fn with_lifetime(secret: &[u8], lifetime_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime_secs,
        }
    }

    /// Token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Issue a token for `account`, valid from now.
    pub fn issue(&self, account: &Account) -> Result<String, AuthError> {
        self.issue_at(account, Utc::now())
    }

    /// Issue a token as if the clock read `now`.
    pub fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> Result<String, AuthError> {
        let identity = Identity {
            account_id: account.id,
            firstname: account.firstname.clone(),
            lastname: account.lastname.clone(),
            email: account.email.clone(),
            role: account.role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.lifetime_secs)).timestamp(),
        };
        encode(&Header::default(), &identity, &self.encoding)
            .map_err(|e| AuthError::Token(format!("jwt encode: {e}")))
    }

    /// Verify a token's signature and expiry, returning the embedded identity.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;
        decode::<Identity>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "session token rejected");
                AuthError::InvalidToken
            })
    }
}

/// Resolve the signing secret: `ACCESS_TOKEN_SECRET` → `JWT_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    for var in ["ACCESS_TOKEN_SECRET", "JWT_SECRET"] {
        if let Ok(secret) = std::env::var(var)
            && !secret.is_empty()
        {
            return secret;
        }
    }
    let secret_path = jwt_secret_path();
    if let Ok(existing) = std::fs::read_to_string(&secret_path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = secret_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(&secret_path, &secret);
    info!(path = %secret_path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cse-motors")
        .join("jwt-secret")
}
