//! # cse_web
//!
//! Server-rendered web front end for CSE Motors.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use cse_core::auth::TokenIssuer;
use cse_core::store::Store;
use tower_http::trace::TraceLayer;

use crate::config::WebConfig;
use crate::handlers::{account, home, inventory, search};
use crate::middleware::{access, session};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account and inventory storage.
    pub store: Arc<dyn Store>,
    /// Web configuration.
    pub config: WebConfig,
    /// Session token issuer, keyed by `config.jwt_secret`.
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: WebConfig) -> Self {
        let tokens =
            TokenIssuer::with_lifetime(config.jwt_secret.as_bytes(), config.session_lifetime_secs);
        Self {
            store,
            config,
            tokens,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    // Public routes (no gate)
    let public = Router::new()
        .route("/", get(home::home))
        .route(
            "/account/login",
            get(account::login_view).post(account::login),
        )
        .route(
            "/account/registration",
            get(account::registration_view).post(account::register),
        )
        .route("/account/register", post(account::register))
        .route("/account/logout", get(account::logout))
        .route(
            "/inventory/getInventory/{classification_id}",
            get(inventory::inventory_json),
        )
        .route(
            "/inventory/type/{classification_id}",
            get(inventory::by_classification),
        )
        .route("/inventory/detail/{inv_id}", get(inventory::detail))
        .route("/inventory/500", get(inventory::trigger_error))
        .route("/search/results", get(search::results));

    // Signed-in account holders
    let authenticated = Router::new()
        .route("/account", get(account::management))
        .route("/account/", get(account::management))
        .route(
            "/account/update",
            get(account::update_view).post(account::update),
        )
        .route("/account/change-password", post(account::change_password))
        .route_layer(from_fn(access::require_authenticated));

    // Inventory management: authentication runs first, then the role check
    let staff = Router::new()
        .route("/inventory", get(inventory::management))
        .route("/inventory/", get(inventory::management))
        .route(
            "/inventory/add-classification",
            get(inventory::classification_view).post(inventory::add_classification),
        )
        .route(
            "/inventory/add-inventory",
            get(inventory::vehicle_view).post(inventory::add_vehicle),
        )
        .route("/inventory/edit/{inv_id}", get(inventory::edit_view))
        .route("/inventory/update", post(inventory::update_vehicle))
        .route(
            "/inventory/delete/{inv_id}",
            get(inventory::delete_view).post(inventory::delete_vehicle),
        )
        .route_layer(from_fn(access::require_staff))
        .route_layer(from_fn(access::require_authenticated));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(staff)
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), session::decode_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
