//! One-shot notices carried across a redirect in a cookie.
//!
//! The notice is base64url-encoded so arbitrary text survives cookie value
//! restrictions. The next rendered page takes it and clears the cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use time::Duration;

/// Cookie name for the pending notice.
pub const NOTICE_COOKIE: &str = "notice";

fn notice_cookie(value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((NOTICE_COOKIE.to_string(), value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(max_age)
        .build()
}

/// Queue `message` for the next rendered page.
pub fn set(jar: CookieJar, message: &str) -> CookieJar {
    let encoded = URL_SAFE_NO_PAD.encode(message.as_bytes());
    jar.add(notice_cookie(encoded, Duration::minutes(5)))
}

/// Take the pending notice, clearing it if one was present.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };
    let message = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());
    let jar = jar.add(notice_cookie(String::new(), Duration::ZERO));
    (jar, message)
}

/// Redirect to `to` with `message` queued.
pub fn redirect(jar: CookieJar, to: &str, message: &str) -> Response {
    (set(jar, message), Redirect::to(to)).into_response()
}
