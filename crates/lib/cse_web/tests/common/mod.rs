//! Shared harness: a router over a seeded in-memory store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response};
use cse_core::auth::password::hash_password;
use cse_core::models::{Account, NewAccount, NewVehicle, Role};
use cse_core::store::{AccountStore, InventoryStore, MemoryStore};
use cse_web::AppState;
use cse_web::config::WebConfig;
use tower::ServiceExt;

pub const PASSWORD: &str = "Str0ngPassw0rd!";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApp {
    /// Classifications get ids 1..=5 in this order.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::with_classifications([
            "Custom", "Sedan", "Sport", "SUV", "Truck",
        ]));
        let config = WebConfig {
            bind_addr: "127.0.0.1:0".into(),
            jwt_secret: "test-secret".into(),
            session_lifetime_secs: 3600,
            development: true,
        };
        let state = AppState::new(store.clone(), config);
        Self { store, state }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        cse_web::router(self.state.clone())
            .oneshot(request)
            .await
            .expect("request")
    }

    pub async fn get(&self, uri: &str, cookies: &[String]) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if !cookies.is_empty() {
            builder = builder.header(COOKIE, cookies.join("; "));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookies: &[String]) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if !cookies.is_empty() {
            builder = builder.header(COOKIE, cookies.join("; "));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Insert an account directly and give it `role`.
    pub async fn seed_account(&self, email: &str, role: Role) -> Account {
        let account = self
            .store
            .register_account(&NewAccount {
                firstname: "Test".into(),
                lastname: "Account".into(),
                email: email.into(),
                password_hash: hash_password(PASSWORD).unwrap(),
            })
            .await
            .unwrap();
        if role != Role::Client {
            self.store.grant_role(email, role).await.unwrap();
        }
        Account { role, ..account }
    }

    /// `jwt=<token>` cookie pair for `account`.
    pub fn session_for(&self, account: &Account) -> String {
        format!("jwt={}", self.state.tokens.issue(account).unwrap())
    }

    pub async fn seed_vehicle(&self, make: &str, model: &str, classification_id: i32) {
        self.store
            .add_vehicle(&NewVehicle {
                make: make.into(),
                model: model.into(),
                year: "2019".into(),
                description: format!("A dependable {make} {model}."),
                image: "/images/vehicles/no-image.png".into(),
                thumbnail: "/images/vehicles/no-image-tn.png".into(),
                price: 28045,
                miles: 41205,
                color: "Yellow".into(),
                classification_id,
            })
            .await
            .unwrap();
    }
}

/// Every `Set-Cookie` header value.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

/// The last `Set-Cookie` header for `name`, if any.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .filter(|c| c.starts_with(&format!("{name}=")))
        .last()
}

/// `name=value` pair from the last `Set-Cookie` for `name`, ready to send back.
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookie(response, name).map(|c| c.split(';').next().unwrap_or_default().to_string())
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
