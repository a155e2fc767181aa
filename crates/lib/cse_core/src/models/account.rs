//! Account domain models.
//!
//! `Account` is the public shape of an account row. The password hash only
//! ever travels inside `AccountWithPassword`, which never leaves the store and
//! the login flow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role, stored as the `account_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Client,
    Employee,
    Admin,
}

impl Role {
    /// Roles allowed through the inventory management gate.
    pub const STAFF: [Role; 2] = [Role::Admin, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Employee => "Employee",
            Role::Admin => "Admin",
        }
    }

    /// Whether this role may manage inventory.
    pub fn is_staff(&self) -> bool {
        Self::STAFF.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Client" => Ok(Role::Client),
            "Employee" => Ok(Role::Employee),
            "Admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Domain account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
}

/// Account with password hash (for the login flow only).
#[derive(Debug, Clone)]
pub struct AccountWithPassword {
    pub account: Account,
    pub password_hash: String,
}

/// Data needed to insert an account. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile fields an account holder may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdate {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Identity embedded in a session token.
///
/// Carries everything the web layer needs to make authorization decisions
/// without touching the store. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub account_id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl Identity {
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        for role in [Role::Client, Role::Employee, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("Owner".parse::<Role>().is_err());
    }

    #[test]
    fn only_admin_and_employee_are_staff() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Employee.is_staff());
        assert!(!Role::Client.is_staff());
    }
}
