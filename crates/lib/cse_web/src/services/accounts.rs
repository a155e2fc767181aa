//! Account session flows shared by the login, update and logout handlers.

use axum_extra::extract::CookieJar;
use cse_core::auth::password::verify_password;
use cse_core::models::Account;
use cse_core::store::StoreResult;
use tracing::{debug, error, info};

use crate::AppState;
use crate::error::AppResult;
use crate::services::cookies::{clear_session_cookie, session_cookie};

/// Check `password` against the stored hash for `email`.
///
/// Returns `None` for an unknown email or a wrong password alike. A stored
/// hash that bcrypt cannot read counts as a mismatch.
pub async fn authenticate(
    state: &AppState,
    email: &str,
    password: &str,
) -> StoreResult<Option<Account>> {
    let Some(record) = state.store.find_account_by_email(email).await? else {
        debug!(email, "login for unknown email");
        return Ok(None);
    };
    match verify_password(password, &record.password_hash) {
        Ok(true) => Ok(Some(record.account)),
        Ok(false) => {
            debug!(email, "login with wrong password");
            Ok(None)
        }
        Err(e) => {
            error!(email, error = %e, "stored password hash is unreadable");
            Ok(None)
        }
    }
}

/// Issue a fresh token for `account` and set it as the session cookie,
/// replacing any previous one.
pub fn start_session(state: &AppState, jar: CookieJar, account: &Account) -> AppResult<CookieJar> {
    let token = state.tokens.issue(account)?;
    info!(account_id = account.id, role = %account.role, "session issued");
    Ok(jar.add(session_cookie(
        &token,
        state.tokens.lifetime_secs(),
        state.config.secure_cookies(),
    )))
}

/// Clear the session cookie.
pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.add(clear_session_cookie())
}
