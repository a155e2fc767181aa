//! Services used by handlers and middleware.

pub mod accounts;
pub mod cookies;
pub mod flash;
