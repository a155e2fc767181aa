//! Session middleware: reads the `jwt` cookie and attaches the caller's
//! identity to the request.
//!
//! A missing cookie is not an error: the request proceeds anonymously. A
//! cookie that fails verification is cleared on the way out and the request
//! also proceeds anonymously.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Response as HttpResponse};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use cse_core::models::Identity;
use tracing::{debug, warn};

use crate::AppState;
use crate::services::cookies::{SESSION_COOKIE, clear_session_cookie};

/// Per-request identity context, inserted by [`decode_session`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
    }
}

/// Axum middleware: verifies the session cookie and inserts a [`Session`]
/// into request extensions.
pub async fn decode_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        request.extensions_mut().insert(Session::anonymous());
        return next.run(request).await;
    };

    match state.tokens.verify(cookie.value()) {
        Ok(identity) => {
            debug!(account_id = identity.account_id, "session verified");
            request
                .extensions_mut()
                .insert(Session::authenticated(identity));
            next.run(request).await
        }
        Err(_) => {
            request.extensions_mut().insert(Session::anonymous());
            let mut response = next.run(request).await;
            // A handler that starts a new session (login) wins over the clear.
            if !sets_cookie(&response, SESSION_COOKIE) {
                match HeaderValue::from_str(&clear_session_cookie().to_string()) {
                    Ok(value) => {
                        response.headers_mut().append(SET_COOKIE, value);
                    }
                    Err(e) => warn!(error = %e, "could not encode session clear cookie"),
                }
            }
            response
        }
    }
}

fn sets_cookie<B>(response: &HttpResponse<B>, name: &str) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| {
            v.split_once('=')
                .is_some_and(|(cookie_name, _)| cookie_name.trim() == name)
        })
}
