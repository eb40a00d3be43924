//! PostgreSQL address repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};

use crate::domain::address::{Address, AddressDraft, AddressId, AddressRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of AddressRepository
#[derive(Debug, Clone)]
pub struct PostgresAddressRepository {
    pool: PgPool,
}

impl PostgresAddressRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn get(&self, id: AddressId) -> Result<Option<Address>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, country, city, street, home_number
            FROM addresses
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get address: {}", e)))?;

        row.as_ref().map(row_to_address).transpose()
    }

    async fn list(&self) -> Result<Vec<Address>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, country, city, street, home_number
            FROM addresses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list addresses: {}", e)))?;

        rows.iter().map(row_to_address).collect()
    }

    async fn create(&self, draft: AddressDraft) -> Result<Address, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to acquire connection: {}", e)))?;

        insert_address(&mut conn, &draft).await
    }

    async fn update(&self, id: AddressId, draft: AddressDraft) -> Result<Address, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to acquire connection: {}", e)))?;

        update_address(&mut conn, id, &draft)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Address '{}' not found", id)))
    }

    async fn delete(&self, id: AddressId) -> Result<bool, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to acquire connection: {}", e)))?;

        delete_address(&mut conn, id).await
    }

    async fn find_by_country(&self, country: &str) -> Result<Vec<Address>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, country, city, street, home_number
            FROM addresses
            WHERE country = $1
            ORDER BY id
            "#,
        )
        .bind(country)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find addresses by country: {}", e)))?;

        rows.iter().map(row_to_address).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count addresses: {}", e)))?;

        Ok(count as usize)
    }
}

/// Insert an address on an existing connection or transaction
pub(crate) async fn insert_address(
    conn: &mut PgConnection,
    draft: &AddressDraft,
) -> Result<Address, DomainError> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO addresses (country, city, street, home_number)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&draft.country)
    .bind(&draft.city)
    .bind(&draft.street)
    .bind(&draft.home_number)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create address: {}", e)))?;

    Ok(Address::new(AddressId::new(id), draft.clone()))
}

/// Overwrite an address, returning `None` if no row has the given ID
pub(crate) async fn update_address(
    conn: &mut PgConnection,
    id: AddressId,
    draft: &AddressDraft,
) -> Result<Option<Address>, DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE addresses
        SET country = $2, city = $3, street = $4, home_number = $5
        WHERE id = $1
        "#,
    )
    .bind(id.value())
    .bind(&draft.country)
    .bind(&draft.city)
    .bind(&draft.street)
    .bind(&draft.home_number)
    .execute(&mut *conn)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to update address: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Address::new(id, draft.clone())))
}

/// Delete an address; the foreign key clears any user reference to it
pub(crate) async fn delete_address(
    conn: &mut PgConnection,
    id: AddressId,
) -> Result<bool, DomainError> {
    let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
        .bind(id.value())
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete address: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

fn row_to_address(row: &PgRow) -> Result<Address, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Failed to read address id: {}", e)))?;

    let draft = AddressDraft {
        country: row
            .try_get("country")
            .map_err(|e| DomainError::storage(format!("Failed to read country: {}", e)))?,
        city: row
            .try_get("city")
            .map_err(|e| DomainError::storage(format!("Failed to read city: {}", e)))?,
        street: row
            .try_get("street")
            .map_err(|e| DomainError::storage(format!("Failed to read street: {}", e)))?,
        home_number: row
            .try_get("home_number")
            .map_err(|e| DomainError::storage(format!("Failed to read home number: {}", e)))?,
    };

    Ok(Address::new(AddressId::new(id), draft))
}
