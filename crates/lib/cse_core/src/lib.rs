//! # cse_core
//!
//! Core domain logic for CSE Motors: accounts, inventory, tokens,
//! form validation and storage.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
