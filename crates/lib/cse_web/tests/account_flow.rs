//! Registration, login, session and profile flows through the full router.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::{PASSWORD, TestApp, body_text, cookie_pair, location, set_cookie};
use cse_core::models::Role;
use cse_core::store::AccountStore;

#[tokio::test]
async fn registration_redirects_to_login_and_stores_a_hash() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/account/registration",
            &format!(
                "account_firstname=Basic&account_lastname=Client&account_email=basic%40340.edu&account_password={PASSWORD}"
            ),
            &[],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/login"));
    let notice = cookie_pair(&response, "notice").expect("notice cookie");

    let stored = app.store.password_hash("basic@340.edu").await.expect("account");
    assert_ne!(stored, PASSWORD);
    assert!(stored.starts_with("$2"));

    let login = app.get("/account/login", &[notice]).await;
    let html = body_text(login).await;
    assert!(html.contains("you&#39;re registered Basic"));
}

#[tokio::test]
async fn register_alias_accepts_the_same_form() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/account/register",
            &format!(
                "account_firstname=Ada&account_lastname=Lovelace&account_email=ada%40340.edu&account_password={PASSWORD}"
            ),
            &[],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.store.email_exists("ada@340.edu").await.unwrap());
}

#[tokio::test]
async fn invalid_registration_redisplays_without_the_password() {
    let app = TestApp::new();
    app.seed_account("taken@340.edu", Role::Client).await;

    let response = app
        .post_form(
            "/account/registration",
            "account_firstname=Basic&account_lastname=C&account_email=taken%40340.edu&account_password=weakpass",
            &[],
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Please provide a last name."));
    assert!(html.contains("Password does not meet requirements."));
    let email_error = html
        .find("Email exists. Please log in or use different email")
        .unwrap();
    let password_error = html.find("Password does not meet requirements.").unwrap();
    assert!(email_error < password_error);
    assert!(html.contains(r#"value="Basic""#));
    assert!(!html.contains("weakpass"));
}

#[tokio::test]
async fn wrong_password_is_rejected_without_a_cookie() {
    let app = TestApp::new();
    app.seed_account("client@340.edu", Role::Client).await;

    let response = app
        .post_form(
            "/account/login",
            "account_email=client%40340.edu&account_password=Wr0ngPassword!",
            &[],
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response, "jwt").is_none());
    let html = body_text(response).await;
    assert!(html.contains("Please check your credentials and try again."));
    assert!(html.contains(r#"value="client@340.edu""#));
}

#[tokio::test]
async fn login_post_without_content_type_renders_error_page() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/account/login")
        .body(Body::from("account_email=client%40340.edu"))
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("Sorry, that form submission could not be read."));
    assert!(!html.contains("Content-Type"));
}

#[tokio::test]
async fn correct_login_sets_session_cookie() {
    let app = TestApp::new();
    let account = app.seed_account("client@340.edu", Role::Client).await;

    let response = app
        .post_form(
            "/account/login",
            &format!("account_email=client%40340.edu&account_password={PASSWORD}"),
            &[],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/"));
    let cookie = set_cookie(&response, "jwt").expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=3600"));

    let token = cookie_pair(&response, "jwt").unwrap();
    let identity = app.state.tokens.verify(&token["jwt=".len()..]).unwrap();
    assert_eq!(identity.account_id, account.id);
    assert_eq!(identity.role, Role::Client);

    let page = app.get("/account/", &[token]).await;
    assert_eq!(page.status(), StatusCode::OK);
    assert!(body_text(page).await.contains("Welcome Test"));
}

#[tokio::test]
async fn expired_token_is_anonymous_and_cleared() {
    let app = TestApp::new();
    let account = app.seed_account("client@340.edu", Role::Client).await;
    let token = app
        .state
        .tokens
        .issue_at(&account, Utc::now() - Duration::hours(2))
        .unwrap();

    let response = app.get("/account/", &[format!("jwt={token}")]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/login"));
    let cleared = set_cookie(&response, "jwt").expect("clearing cookie");
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn tampered_token_is_cleared_on_public_pages() {
    let app = TestApp::new();
    let account = app.seed_account("client@340.edu", Role::Client).await;
    let mut token = app.state.tokens.issue(&account).unwrap();
    token.insert_str(token.find('.').unwrap() + 1, "x");

    let response = app.get("/", &[format!("jwt={token}")]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookie(&response, "jwt").expect("clearing cookie");
    assert!(cleared.contains("Max-Age=0"));
    assert!(body_text(response).await.contains("My Account"));
}

#[tokio::test]
async fn anonymous_account_page_redirects_to_login() {
    let app = TestApp::new();
    let response = app.get("/account/", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/login"));
    assert!(set_cookie(&response, "jwt").is_none());
}

#[tokio::test]
async fn email_update_reissues_cookie_with_new_identity() {
    let app = TestApp::new();
    let account = app.seed_account("a@x.com", Role::Client).await;
    let session = app.session_for(&account);

    let response = app
        .post_form(
            "/account/update",
            "account_firstname=Test&account_lastname=Account&account_email=b%40x.com",
            &[session],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/account/"));
    let token = cookie_pair(&response, "jwt").expect("reissued cookie");
    let identity = app.state.tokens.verify(&token["jwt=".len()..]).unwrap();
    assert_eq!(identity.email, "b@x.com");
    assert_eq!(identity.account_id, account.id);
    assert!(!app.store.email_exists("a@x.com").await.unwrap());
}

#[tokio::test]
async fn email_update_to_taken_address_is_redisplayed() {
    let app = TestApp::new();
    let account = app.seed_account("a@x.com", Role::Client).await;
    app.seed_account("b@x.com", Role::Client).await;

    let response = app
        .post_form(
            "/account/update",
            "account_firstname=Test&account_lastname=Account&account_email=b%40x.com",
            &[app.session_for(&account)],
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response, "jwt").is_none());
    assert!(body_text(response).await.contains("Email exists."));
}

#[tokio::test]
async fn password_change_requires_a_strong_password() {
    let app = TestApp::new();
    let account = app.seed_account("client@340.edu", Role::Client).await;
    let session = app.session_for(&account);
    let before = app.store.password_hash("client@340.edu").await;

    let weak = app
        .post_form("/account/change-password", "account_password=short", &[session.clone()])
        .await;
    assert_eq!(weak.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.password_hash("client@340.edu").await, before);

    let strong = app
        .post_form(
            "/account/change-password",
            "account_password=An0therStr0ng!",
            &[session],
        )
        .await;
    assert_eq!(strong.status(), StatusCode::SEE_OTHER);
    assert_ne!(app.store.password_hash("client@340.edu").await, before);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = TestApp::new();
    let account = app.seed_account("client@340.edu", Role::Client).await;

    let response = app.get("/account/logout", &[app.session_for(&account)]).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    let cleared = set_cookie(&response, "jwt").expect("clearing cookie");
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn login_with_store_offline_shows_unavailable_notice() {
    let app = TestApp::new();
    app.store.set_unavailable(true);

    let response = app
        .post_form(
            "/account/login",
            &format!("account_email=client%40340.edu&account_password={PASSWORD}"),
            &[],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(response).await.contains("temporarily unavailable"));
}
