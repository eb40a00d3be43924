//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::address::{Address, AddressDraft, AddressId};
use crate::domain::user::{User, UserId, UserRecord, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::address::{delete_address, insert_address, update_address};

/// Prefix a clause with the user/address join every read shares
macro_rules! select_users {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.birthday, u.login, u.password,
                   u.description, a.id AS address_id, a.country, a.city, a.street,
                   a.home_number
            FROM users u
            LEFT JOIN addresses a ON a.id = u.address_id
            "#,
            $tail
        )
    };
}

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_users(
        &self,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
        context: &str,
    ) -> Result<Vec<User>, DomainError> {
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to {}: {}", context, e)))?;

        rows.iter().map(row_to_user).collect()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(select_users!("WHERE u.id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.fetch_users(sqlx::query(select_users!("ORDER BY u.id")), "list users")
            .await
    }

    async fn create(&self, record: UserRecord) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let address = match &record.address {
            Some(draft) => Some(insert_address(&mut tx, draft).await?),
            None => None,
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, birthday, login, password,
                               description, address_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.birthday)
        .bind(&record.login)
        .bind(&record.password_hash)
        .bind(&record.description)
        .bind(address.as_ref().map(|a| a.id().value()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &record.login, "create user"))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit user: {}", e)))?;

        Ok(User::new(UserId::new(id), record, address))
    }

    async fn update(&self, id: UserId, record: UserRecord) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let current: Option<Option<i64>> =
            sqlx::query_scalar("SELECT address_id FROM users WHERE id = $1 FOR UPDATE")
                .bind(id.value())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to lock user: {}", e)))?;

        let Some(current_address) = current else {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        };
        let current_address = current_address.map(AddressId::new);

        let address = match (current_address, &record.address) {
            (Some(existing), Some(draft)) => match update_address(&mut tx, existing, draft).await? {
                Some(address) => Some(address),
                None => Some(insert_address(&mut tx, draft).await?),
            },
            (None, Some(draft)) => Some(insert_address(&mut tx, draft).await?),
            (_, None) => None,
        };

        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, birthday = $4, login = $5,
                password = $6, description = $7, address_id = $8
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.birthday)
        .bind(&record.login)
        .bind(&record.password_hash)
        .bind(&record.description)
        .bind(address.as_ref().map(|a| a.id().value()))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &record.login, "update user"))?;

        if let (Some(orphan), None) = (current_address, &address) {
            delete_address(&mut tx, orphan).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit user: {}", e)))?;

        Ok(User::new(id, record, address))
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let removed: Option<Option<i64>> =
            sqlx::query_scalar("DELETE FROM users WHERE id = $1 RETURNING address_id")
                .bind(id.value())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        let Some(address_id) = removed else {
            return Ok(false);
        };

        if let Some(address_id) = address_id {
            delete_address(&mut tx, AddressId::new(address_id)).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit delete: {}", e)))?;

        Ok(true)
    }

    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<User>, DomainError> {
        let query = sqlx::query(select_users!(
            "WHERE u.first_name = $1 AND u.last_name = $2 ORDER BY u.id"
        ))
        .bind(first_name)
        .bind(last_name);

        self.fetch_users(query, "find users by name").await
    }

    async fn find_with_address(&self) -> Result<Vec<User>, DomainError> {
        let query = sqlx::query(select_users!(
            "WHERE u.address_id IS NOT NULL ORDER BY u.id"
        ));

        self.fetch_users(query, "find users with addresses").await
    }

    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, DomainError> {
        let query = sqlx::query(select_users!("WHERE u.birthday < $1 ORDER BY u.id")).bind(date);

        self.fetch_users(query, "find users by birthday").await
    }

    async fn find_by_login_containing(&self, fragment: &str) -> Result<Vec<User>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to start read-only transaction: {}", e)))?;

        let rows = sqlx::query(select_users!(
            "WHERE strpos(u.login, $1) > 0 ORDER BY u.id"
        ))
        .bind(fragment)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find users by login: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to end read-only transaction: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

/// Map a write failure, turning a unique-login violation into a conflict
fn map_write_error(error: sqlx::Error, login: &str, context: &str) -> DomainError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() {
            return DomainError::conflict(format!("Login '{}' already exists", login));
        }
    }

    DomainError::storage(format!("Failed to {}: {}", context, error))
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Failed to read user row: {}", e));

    let id: i64 = row.try_get("id").map_err(read)?;

    let record = UserRecord {
        first_name: row.try_get("first_name").map_err(read)?,
        last_name: row.try_get("last_name").map_err(read)?,
        birthday: row.try_get("birthday").map_err(read)?,
        login: row.try_get("login").map_err(read)?,
        password_hash: row.try_get("password").map_err(read)?,
        description: row.try_get("description").map_err(read)?,
        address: None,
    };

    let address_id: Option<i64> = row.try_get("address_id").map_err(read)?;

    let address = match address_id {
        Some(address_id) => {
            let draft = AddressDraft {
                country: row.try_get("country").map_err(read)?,
                city: row.try_get("city").map_err(read)?,
                street: row.try_get("street").map_err(read)?,
                home_number: row.try_get("home_number").map_err(read)?,
            };
            Some(Address::new(AddressId::new(address_id), draft))
        }
        None => None,
    };

    Ok(User::new(UserId::new(id), record, address))
}
