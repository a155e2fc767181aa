//! PostgreSQL-backed store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::{AccountStore, InventoryStore, StoreError, StoreResult};
use crate::models::{
    Account, AccountUpdate, AccountWithPassword, Classification, NewAccount, NewVehicle, Role,
    Vehicle,
};

const ACCOUNT_COLUMNS: &str = "account_id, account_firstname, account_lastname, account_email, \
                               account_type::text AS account_type";

const VEHICLE_SELECT: &str = "SELECT i.inv_id, i.inv_make, i.inv_model, i.inv_year, \
                              i.inv_description, i.inv_image, i.inv_thumbnail, i.inv_price, \
                              i.inv_miles, i.inv_color, i.classification_id, c.classification_name \
                              FROM inventory AS i \
                              JOIN classification AS c ON i.classification_id = c.classification_id";

/// Store backed by a shared connection pool. Each operation checks out one
/// connection for the duration of a single statement.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, sqlx::Error> {
    let role: String = row.try_get("account_type")?;
    let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
        index: "account_type".into(),
        source: Box::new(e),
    })?;
    Ok(Account {
        id: row.try_get("account_id")?,
        firstname: row.try_get("account_firstname")?,
        lastname: row.try_get("account_lastname")?,
        email: row.try_get("account_email")?,
        role,
    })
}

impl<'r> FromRow<'r, PgRow> for Classification {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Classification {
            id: row.try_get("classification_id")?,
            name: row.try_get("classification_name")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Vehicle {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Vehicle {
            id: row.try_get("inv_id")?,
            make: row.try_get("inv_make")?,
            model: row.try_get("inv_model")?,
            year: row.try_get("inv_year")?,
            description: row.try_get("inv_description")?,
            image: row.try_get("inv_image")?,
            thumbnail: row.try_get("inv_thumbnail")?,
            price: row.try_get("inv_price")?,
            miles: row.try_get("inv_miles")?,
            color: row.try_get("inv_color")?,
            classification_id: row.try_get("classification_id")?,
            classification_name: row.try_get("classification_name")?,
        })
    }
}

/// Escape `LIKE` wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl AccountStore for PgStore {
    async fn register_account(&self, account: &NewAccount) -> StoreResult<Account> {
        let sql = format!(
            "INSERT INTO account (account_firstname, account_lastname, account_email, \
             account_password, account_type) VALUES ($1, $2, $3, $4, 'Client') \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&account.firstname)
            .bind(&account.lastname)
            .bind(&account.email)
            .bind(&account.password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(account_from_row(&row)?)
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM account WHERE account_email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<AccountWithPassword>> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS}, account_password FROM account WHERE account_email = $1"
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            None => Ok(None),
            Some(row) => Ok(Some(AccountWithPassword {
                account: account_from_row(&row)?,
                password_hash: row.try_get("account_password")?,
            })),
        }
    }

    async fn find_account_by_id(&self, account_id: i32) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE account_id = $1");
        let row = sqlx::query(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref()
            .map(account_from_row)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn update_account(&self, account_id: i32, update: &AccountUpdate) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE account SET account_firstname = $1, account_lastname = $2, \
             account_email = $3 WHERE account_id = $4",
        )
        .bind(&update.firstname)
        .bind(&update.lastname)
        .bind(&update.email)
        .bind(account_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_password(&self, account_id: i32, password_hash: &str) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE account SET account_password = $1 WHERE account_id = $2")
            .bind(password_hash)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn grant_role(&self, email: &str, role: Role) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE account SET account_type = $1::account_type WHERE account_email = $2",
        )
        .bind(role.as_str())
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn list_classifications(&self) -> StoreResult<Vec<Classification>> {
        let rows = sqlx::query_as::<_, Classification>(
            "SELECT classification_id, classification_name FROM classification \
             ORDER BY classification_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_classification(&self, name: &str) -> StoreResult<u64> {
        let result = sqlx::query("INSERT INTO classification (classification_name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn vehicles_by_classification(
        &self,
        classification_id: i32,
    ) -> StoreResult<Vec<Vehicle>> {
        let sql = format!("{VEHICLE_SELECT} WHERE i.classification_id = $1 ORDER BY i.inv_id");
        let rows = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(classification_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn vehicle_by_id(&self, inv_id: i32) -> StoreResult<Option<Vehicle>> {
        let sql = format!("{VEHICLE_SELECT} WHERE i.inv_id = $1");
        let row = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(inv_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn add_vehicle(&self, vehicle: &NewVehicle) -> StoreResult<u64> {
        let result = sqlx::query(
            "INSERT INTO inventory (inv_make, inv_model, inv_year, inv_description, inv_image, \
             inv_thumbnail, inv_price, inv_miles, inv_color, classification_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.year)
        .bind(&vehicle.description)
        .bind(&vehicle.image)
        .bind(&vehicle.thumbnail)
        .bind(vehicle.price)
        .bind(vehicle.miles)
        .bind(&vehicle.color)
        .bind(vehicle.classification_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_vehicle(&self, inv_id: i32, vehicle: &NewVehicle) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE inventory SET inv_make = $1, inv_model = $2, inv_year = $3, \
             inv_description = $4, inv_image = $5, inv_thumbnail = $6, inv_price = $7, \
             inv_miles = $8, inv_color = $9, classification_id = $10 WHERE inv_id = $11",
        )
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.year)
        .bind(&vehicle.description)
        .bind(&vehicle.image)
        .bind(&vehicle.thumbnail)
        .bind(vehicle.price)
        .bind(vehicle.miles)
        .bind(&vehicle.color)
        .bind(vehicle.classification_id)
        .bind(inv_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_vehicle(&self, inv_id: i32) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM inventory WHERE inv_id = $1")
            .bind(inv_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn search_vehicles(&self, term: &str) -> StoreResult<Vec<Vehicle>> {
        let sql = format!(
            "{VEHICLE_SELECT} WHERE i.inv_make ILIKE $1 ESCAPE '\\' \
             OR i.inv_model ILIKE $1 ESCAPE '\\' \
             OR i.inv_description ILIKE $1 ESCAPE '\\' \
             OR c.classification_name ILIKE $1 ESCAPE '\\' \
             ORDER BY i.inv_id"
        );
        let rows = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
