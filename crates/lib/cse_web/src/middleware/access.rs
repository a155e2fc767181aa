//! Access-control gate.
//!
//! Two middlewares, layered authentication first:
//!
//! ```ignore
//! router
//!     .route_layer(from_fn(access::require_staff))
//!     .route_layer(from_fn(access::require_authenticated))
//! ```
//!
//! `require_staff` checks authentication again itself, so it is safe on its
//! own as well.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use cse_core::models::Identity;
use tracing::warn;

use crate::middleware::session::Session;
use crate::services::flash;

pub const LOGIN_PATH: &str = "/account/login";
pub const LOGIN_NOTICE: &str = "Please log in.";
pub const FORBIDDEN_NOTICE: &str =
    "You do not have permission to access inventory management. Please log in with an authorized account.";

fn identity(request: &Request) -> Option<&Identity> {
    request
        .extensions()
        .get::<Session>()
        .and_then(Session::identity)
}

fn to_login() -> Response {
    flash::redirect(CookieJar::new(), LOGIN_PATH, LOGIN_NOTICE)
}

/// Halts with a redirect to the login page unless the request carries a
/// verified identity.
pub async fn require_authenticated(request: Request, next: Next) -> Response {
    if identity(&request).is_none() {
        return to_login();
    }
    next.run(request).await
}

/// Halts unless the caller is an Employee or Admin. Unauthenticated callers
/// go to login; authenticated callers with another role go home.
pub async fn require_staff(request: Request, next: Next) -> Response {
    let Some(identity) = identity(&request) else {
        return to_login();
    };
    if !identity.is_staff() {
        warn!(
            account_id = identity.account_id,
            role = %identity.role,
            path = %request.uri().path(),
            "staff route refused"
        );
        return flash::redirect(CookieJar::new(), "/", FORBIDDEN_NOTICE);
    }
    next.run(request).await
}

/// Extractor for handlers behind [`require_authenticated`]. Rejects with the
/// same login redirect if it is ever reached without an identity.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for CurrentAccount {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .and_then(Session::identity)
            .cloned()
            .map(CurrentAccount)
            .ok_or_else(to_login)
    }
}
