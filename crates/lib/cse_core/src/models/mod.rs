//! Domain models.

pub mod account;
pub mod inventory;

pub use account::{Account, AccountUpdate, AccountWithPassword, Identity, NewAccount, Role};
pub use inventory::{Classification, NewVehicle, Vehicle};
