//! Storage for accounts and inventory.
//!
//! Handlers receive the store as an injected `Arc<dyn Store>`; nothing in the
//! crate reaches for a global pool. Every write is a single statement whose
//! result is `Ok(rows_affected)` or a [`StoreError`] saying what went wrong,
//! so callers can tell "nothing matched" apart from "storage is down".

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Account, AccountUpdate, AccountWithPassword, Classification, NewAccount, NewVehicle, Role,
    Vehicle,
};

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Duplicate value: {0}")]
    Conflict(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Whether retrying later could succeed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StoreError::Conflict(db.message().to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a `Client` account. Fails with `Conflict` if the email is taken.
    async fn register_account(&self, account: &NewAccount) -> StoreResult<Account>;

    async fn email_exists(&self, email: &str) -> StoreResult<bool>;

    async fn find_account_by_email(&self, email: &str)
    -> StoreResult<Option<AccountWithPassword>>;

    async fn find_account_by_id(&self, account_id: i32) -> StoreResult<Option<Account>>;

    async fn update_account(&self, account_id: i32, update: &AccountUpdate) -> StoreResult<u64>;

    async fn update_password(&self, account_id: i32, password_hash: &str) -> StoreResult<u64>;

    async fn grant_role(&self, email: &str, role: Role) -> StoreResult<u64>;
}

/// Inventory store.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All classifications ordered by name.
    async fn list_classifications(&self) -> StoreResult<Vec<Classification>>;

    async fn create_classification(&self, name: &str) -> StoreResult<u64>;

    async fn vehicles_by_classification(&self, classification_id: i32)
    -> StoreResult<Vec<Vehicle>>;

    async fn vehicle_by_id(&self, inv_id: i32) -> StoreResult<Option<Vehicle>>;

    async fn add_vehicle(&self, vehicle: &NewVehicle) -> StoreResult<u64>;

    async fn update_vehicle(&self, inv_id: i32, vehicle: &NewVehicle) -> StoreResult<u64>;

    async fn delete_vehicle(&self, inv_id: i32) -> StoreResult<u64>;

    /// Case-insensitive substring match over make, model, description and
    /// classification name.
    async fn search_vehicles(&self, term: &str) -> StoreResult<Vec<Vehicle>>;
}

/// Everything the web layer needs from storage.
pub trait Store: AccountStore + InventoryStore {}

impl<T: AccountStore + InventoryStore> Store for T {}
