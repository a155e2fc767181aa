//! In-memory store for tests and local demos.
//!
//! Mirrors the PostgreSQL store's observable behavior: unique emails and
//! classification names, `Client` as the registration role, zero rows for
//! writes that match nothing. [`MemoryStore::set_unavailable`] makes every
//! operation fail as if the database were unreachable.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AccountStore, InventoryStore, StoreError, StoreResult};
use crate::models::{
    Account, AccountUpdate, AccountWithPassword, Classification, NewAccount, NewVehicle, Role,
    Vehicle,
};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<AccountWithPassword>,
    classifications: Vec<Classification>,
    vehicles: Vec<(i32, NewVehicle)>,
    next_account_id: i32,
    next_classification_id: i32,
    next_inv_id: i32,
}

impl Tables {
    fn classification_name(&self, classification_id: i32) -> Option<&str> {
        self.classifications
            .iter()
            .find(|c| c.id == classification_id)
            .map(|c| c.name.as_str())
    }

    fn joined(&self, inv_id: i32, vehicle: &NewVehicle) -> Option<Vehicle> {
        let classification_name = self.classification_name(vehicle.classification_id)?;
        Some(Vehicle {
            id: inv_id,
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.clone(),
            description: vehicle.description.clone(),
            image: vehicle.image.clone(),
            thumbnail: vehicle.thumbnail.clone(),
            price: vehicle.price,
            miles: vehicle.miles,
            color: vehicle.color.clone(),
            classification_id: vehicle.classification_id,
            classification_name: classification_name.to_string(),
        })
    }

    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.account.email == email && Some(a.account.id) != except)
    }
}

/// Store holding all tables in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given classification names.
    pub fn with_classifications<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tables = Tables::default();
        for name in names {
            tables.next_classification_id += 1;
            tables.classifications.push(Classification {
                id: tables.next_classification_id,
                name: name.into(),
            });
        }
        Self {
            tables: RwLock::new(tables),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate the database being unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(())
    }

    /// Password hash stored for `email`, if any.
    pub async fn password_hash(&self, email: &str) -> Option<String> {
        self.tables
            .read()
            .await
            .accounts
            .iter()
            .find(|a| a.account.email == email)
            .map(|a| a.password_hash.clone())
    }

    pub async fn vehicle_count(&self) -> usize {
        self.tables.read().await.vehicles.len()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn register_account(&self, account: &NewAccount) -> StoreResult<Account> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.email_taken(&account.email, None) {
            return Err(StoreError::Conflict(format!(
                "account_email {} already exists",
                account.email
            )));
        }
        tables.next_account_id += 1;
        let created = Account {
            id: tables.next_account_id,
            firstname: account.firstname.clone(),
            lastname: account.lastname.clone(),
            email: account.email.clone(),
            role: Role::Client,
        };
        tables.accounts.push(AccountWithPassword {
            account: created.clone(),
            password_hash: account.password_hash.clone(),
        });
        Ok(created)
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        self.check_available()?;
        Ok(self.tables.read().await.email_taken(email, None))
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<AccountWithPassword>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.account.email == email)
            .cloned())
    }

    async fn find_account_by_id(&self, account_id: i32) -> StoreResult<Option<Account>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.account.id == account_id)
            .map(|a| a.account.clone()))
    }

    async fn update_account(&self, account_id: i32, update: &AccountUpdate) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.email_taken(&update.email, Some(account_id)) {
            return Err(StoreError::Conflict(format!(
                "account_email {} already exists",
                update.email
            )));
        }
        match tables
            .accounts
            .iter_mut()
            .find(|a| a.account.id == account_id)
        {
            Some(row) => {
                row.account.firstname = update.firstname.clone();
                row.account.lastname = update.lastname.clone();
                row.account.email = update.email.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_password(&self, account_id: i32, password_hash: &str) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables
            .accounts
            .iter_mut()
            .find(|a| a.account.id == account_id)
        {
            Some(row) => {
                row.password_hash = password_hash.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn grant_role(&self, email: &str, role: Role) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables
            .accounts
            .iter_mut()
            .find(|a| a.account.email == email)
        {
            Some(row) => {
                row.account.role = role;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_classifications(&self) -> StoreResult<Vec<Classification>> {
        self.check_available()?;
        let mut classifications = self.tables.read().await.classifications.clone();
        classifications.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(classifications)
    }

    async fn create_classification(&self, name: &str) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.classifications.iter().any(|c| c.name == name) {
            return Err(StoreError::Conflict(format!(
                "classification_name {name} already exists"
            )));
        }
        tables.next_classification_id += 1;
        let id = tables.next_classification_id;
        tables.classifications.push(Classification {
            id,
            name: name.to_string(),
        });
        Ok(1)
    }

    async fn vehicles_by_classification(
        &self,
        classification_id: i32,
    ) -> StoreResult<Vec<Vehicle>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .filter(|(_, v)| v.classification_id == classification_id)
            .filter_map(|(id, v)| tables.joined(*id, v))
            .collect())
    }

    async fn vehicle_by_id(&self, inv_id: i32) -> StoreResult<Option<Vehicle>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .find(|(id, _)| *id == inv_id)
            .and_then(|(id, v)| tables.joined(*id, v)))
    }

    async fn add_vehicle(&self, vehicle: &NewVehicle) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.classification_name(vehicle.classification_id).is_none() {
            return Err(StoreError::Query(format!(
                "classification {} does not exist",
                vehicle.classification_id
            )));
        }
        tables.next_inv_id += 1;
        let id = tables.next_inv_id;
        tables.vehicles.push((id, vehicle.clone()));
        Ok(1)
    }

    async fn update_vehicle(&self, inv_id: i32, vehicle: &NewVehicle) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.classification_name(vehicle.classification_id).is_none() {
            return Err(StoreError::Query(format!(
                "classification {} does not exist",
                vehicle.classification_id
            )));
        }
        match tables.vehicles.iter_mut().find(|(id, _)| *id == inv_id) {
            Some((_, row)) => {
                *row = vehicle.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_vehicle(&self, inv_id: i32) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|(id, _)| *id != inv_id);
        Ok((before - tables.vehicles.len()) as u64)
    }

    async fn search_vehicles(&self, term: &str) -> StoreResult<Vec<Vehicle>> {
        self.check_available()?;
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .filter_map(|(id, v)| tables.joined(*id, v))
            .filter(|v| {
                [&v.make, &v.model, &v.description, &v.classification_name]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect())
    }
}
