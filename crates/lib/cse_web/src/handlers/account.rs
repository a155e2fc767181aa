//! Account request handlers: login, registration, profile and password.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use cse_core::auth::password::hash_password;
use cse_core::models::{Identity, NewAccount};
use cse_core::store::StoreError;
use cse_core::validation::forms::EMAIL_EXISTS;
use cse_core::validation::{
    AccountUpdateForm, FieldError, FormData, LoginForm, PasswordForm, RegistrationForm,
    Validated, check_account_update, check_registration, validate,
};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::extract::Form;
use crate::handlers::{Page, failure_notice, failure_status, render};
use crate::middleware::access::CurrentAccount;
use crate::middleware::session::Session;
use crate::services::{accounts, flash};
use crate::views;

const LOGIN_FAILED: &str = "Please check your credentials and try again.";

fn login_page(form: &LoginForm, errors: &[FieldError]) -> Page {
    Page::new("Login", views::account::login(form, errors))
}

fn registration_page(form: &RegistrationForm, errors: &[FieldError]) -> Page {
    Page::new("Register", views::account::registration(form, errors))
}

fn profile_form(identity: &Identity) -> AccountUpdateForm {
    AccountUpdateForm {
        account_firstname: identity.firstname.clone(),
        account_lastname: identity.lastname.clone(),
        account_email: identity.email.clone(),
    }
}

fn update_page(
    form: &AccountUpdateForm,
    profile_errors: &[FieldError],
    password_errors: &[FieldError],
) -> Page {
    Page::new(
        "Edit Account",
        views::account::update(form, profile_errors, password_errors),
    )
}

/// `GET /account/login`
pub async fn login_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Response {
    render(&state, &session, jar, login_page(&LoginForm::default(), &[])).await
}

/// `POST /account/login`: issue a session cookie on success, otherwise
/// re-render with the email kept and no cookie set.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let form = match validate(form) {
        Validated::Proceed(form) => form,
        Validated::Redisplay { errors, echoed } => {
            let page = login_page(&echoed, &errors).status(StatusCode::BAD_REQUEST);
            return Ok(render(&state, &session, jar, page).await);
        }
    };

    let mut echoed = form.clone();
    echoed.redact();
    match accounts::authenticate(&state, &form.account_email, &form.account_password).await {
        Ok(Some(account)) => {
            let jar = accounts::start_session(&state, jar, &account)?;
            Ok((jar, Redirect::to("/account/")).into_response())
        }
        Ok(None) => {
            let page = login_page(&echoed, &[])
                .status(StatusCode::BAD_REQUEST)
                .notice(LOGIN_FAILED);
            Ok(render(&state, &session, jar, page).await)
        }
        Err(e) => {
            let page = login_page(&echoed, &[])
                .status(failure_status(&e))
                .notice(failure_notice("login", &e, LOGIN_FAILED));
            Ok(render(&state, &session, jar, page).await)
        }
    }
}

/// `GET /account/registration`
pub async fn registration_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Response {
    let page = registration_page(&RegistrationForm::default(), &[]);
    render(&state, &session, jar, page).await
}

/// `POST /account/registration`: create a Client account and send the
/// visitor to the login page.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<RegistrationForm>,
) -> AppResult<Response> {
    const FAILED: &str = "Sorry, the registration failed.";

    let mut echoed = form.clone();
    echoed.redact();
    let form = match check_registration(state.store.as_ref(), form).await {
        Ok(Validated::Proceed(form)) => form,
        Ok(Validated::Redisplay { errors, echoed }) => {
            let page = registration_page(&echoed, &errors).status(StatusCode::BAD_REQUEST);
            return Ok(render(&state, &session, jar, page).await);
        }
        Err(e) => {
            let page = registration_page(&echoed, &[])
                .status(failure_status(&e))
                .notice(failure_notice("register", &e, FAILED));
            return Ok(render(&state, &session, jar, page).await);
        }
    };

    let new_account = NewAccount {
        firstname: form.account_firstname.clone(),
        lastname: form.account_lastname.clone(),
        email: form.account_email.clone(),
        password_hash: hash_password(&form.account_password)?,
    };
    match state.store.register_account(&new_account).await {
        Ok(account) => {
            info!(account_id = account.id, "account registered");
            let message = format!(
                "Congratulations, you're registered {}. Please log in.",
                account.firstname
            );
            Ok(flash::redirect(jar, "/account/login", &message))
        }
        Err(StoreError::Conflict(_)) => {
            let errors = [FieldError::new("account_email", EMAIL_EXISTS)];
            let page = registration_page(&echoed, &errors).status(StatusCode::BAD_REQUEST);
            Ok(render(&state, &session, jar, page).await)
        }
        Err(e) => {
            let page = registration_page(&echoed, &[])
                .status(failure_status(&e))
                .notice(failure_notice("register", &e, FAILED));
            Ok(render(&state, &session, jar, page).await)
        }
    }
}

/// `GET /account/`
pub async fn management(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    CurrentAccount(identity): CurrentAccount,
) -> Response {
    let page = Page::new("Account Management", views::account::management(&identity));
    render(&state, &session, jar, page).await
}

/// `GET /account/update`
pub async fn update_view(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    CurrentAccount(identity): CurrentAccount,
) -> Response {
    let page = update_page(&profile_form(&identity), &[], &[]);
    render(&state, &session, jar, page).await
}

/// `POST /account/update`: change the signed-in account's profile and reissue
/// the session cookie so the new details take effect immediately.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    CurrentAccount(identity): CurrentAccount,
    Form(form): Form<AccountUpdateForm>,
) -> AppResult<Response> {
    const FAILED: &str = "Sorry, the update failed.";

    let echoed = form.clone();
    let form = match check_account_update(state.store.as_ref(), &identity.email, form).await {
        Ok(Validated::Proceed(form)) => form,
        Ok(Validated::Redisplay { errors, echoed }) => {
            let page = update_page(&echoed, &errors, &[]).status(StatusCode::BAD_REQUEST);
            return Ok(render(&state, &session, jar, page).await);
        }
        Err(e) => {
            let page = update_page(&echoed, &[], &[])
                .status(failure_status(&e))
                .notice(failure_notice("update account", &e, FAILED));
            return Ok(render(&state, &session, jar, page).await);
        }
    };

    let written = state
        .store
        .update_account(identity.account_id, &form.to_update())
        .await;
    let refreshed = match written {
        Ok(0) => Ok(None),
        Ok(_) => state.store.find_account_by_id(identity.account_id).await,
        Err(e) => Err(e),
    };
    match refreshed {
        Ok(Some(account)) => {
            info!(account_id = account.id, "account updated");
            let jar = accounts::start_session(&state, jar, &account)?;
            Ok(flash::redirect(
                jar,
                "/account/",
                "Your account information has been updated.",
            ))
        }
        Ok(None) => {
            let page = update_page(&form, &[], &[])
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .notice(FAILED);
            Ok(render(&state, &session, jar, page).await)
        }
        Err(StoreError::Conflict(_)) => {
            let errors = [FieldError::new("account_email", EMAIL_EXISTS)];
            let page = update_page(&form, &errors, &[]).status(StatusCode::BAD_REQUEST);
            Ok(render(&state, &session, jar, page).await)
        }
        Err(e) => {
            let page = update_page(&form, &[], &[])
                .status(failure_status(&e))
                .notice(failure_notice("update account", &e, FAILED));
            Ok(render(&state, &session, jar, page).await)
        }
    }
}

/// `POST /account/change-password`
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    CurrentAccount(identity): CurrentAccount,
    Form(form): Form<PasswordForm>,
) -> AppResult<Response> {
    const FAILED: &str = "Sorry, the password change failed.";

    let profile = profile_form(&identity);
    let form = match validate(form) {
        Validated::Proceed(form) => form,
        Validated::Redisplay { errors, .. } => {
            let page = update_page(&profile, &[], &errors).status(StatusCode::BAD_REQUEST);
            return Ok(render(&state, &session, jar, page).await);
        }
    };

    let hash = hash_password(&form.account_password)?;
    match state.store.update_password(identity.account_id, &hash).await {
        Ok(0) => {
            let page = update_page(&profile, &[], &[])
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .notice(FAILED);
            Ok(render(&state, &session, jar, page).await)
        }
        Ok(_) => {
            info!(account_id = identity.account_id, "password changed");
            Ok(flash::redirect(
                jar,
                "/account/",
                "Your password has been updated.",
            ))
        }
        Err(e) => {
            let page = update_page(&profile, &[], &[])
                .status(failure_status(&e))
                .notice(failure_notice("change password", &e, FAILED));
            Ok(render(&state, &session, jar, page).await)
        }
    }
}

/// `GET /account/logout`
pub async fn logout(jar: CookieJar) -> Response {
    (accounts::end_session(jar), Redirect::to("/")).into_response()
}
