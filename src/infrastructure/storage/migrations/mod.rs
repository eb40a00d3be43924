//! Database migrations infrastructure

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Executor;
use tracing::info;

use super::postgres::validate_schema_name;
use crate::domain::DomainError;

/// Trait for running database migrations
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Runs all pending migrations, returning how many were applied
    async fn run(&self) -> Result<usize, DomainError>;

    /// Reverts the last migration, returning its version if one was applied
    async fn revert(&self) -> Result<Option<i64>, DomainError>;

    /// Returns the current migration version
    async fn version(&self) -> Result<Option<i64>, DomainError>;
}

/// PostgreSQL migrator applying the users schema migrations
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
    schema: String,
    migrations: Vec<Migration>,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Result<Self, DomainError> {
        let schema = schema.into();
        validate_schema_name(&schema)?;
        let migrations = users_schema_migrations(&schema);

        Ok(Self {
            pool,
            schema,
            migrations,
        })
    }

    /// Creates the schema and its migrations table if they don't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        let statement = format!(
            r#"
            CREATE SCHEMA IF NOT EXISTS {schema};
            CREATE TABLE IF NOT EXISTS {schema}._migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
            schema = self.schema
        );

        self.pool
            .execute(statement.as_str())
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {}._migrations WHERE version = $1)",
            self.schema
        );

        sqlx::query_scalar(&query)
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Runs a single migration and records it in the same transaction
    ///
    /// Returns `false` when the migration was already applied.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        (&mut *tx)
            .execute(migration.up.as_str())
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        let record = format!(
            "INSERT INTO {}._migrations (version, description) VALUES ($1, $2)",
            self.schema
        );

        sqlx::query(&record)
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to record migration {}: {}", migration.version, e))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit migration: {}", e)))?;

        info!(version = migration.version, description = %migration.description, "Applied migration");
        Ok(true)
    }

    /// Reverts a single migration and removes its record
    pub async fn revert_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if !self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        (&mut *tx)
            .execute(migration.down.as_str())
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to revert migration {}: {}",
                    migration.version, e
                ))
            })?;

        let remove = format!("DELETE FROM {}._migrations WHERE version = $1", self.schema);

        sqlx::query(&remove)
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit revert: {}", e)))?;

        info!(version = migration.version, "Reverted migration");
        Ok(true)
    }
}

#[async_trait]
impl Migrator for PostgresMigrator {
    async fn run(&self) -> Result<usize, DomainError> {
        let mut applied = 0;

        for migration in &self.migrations {
            if self.run_migration(migration).await? {
                applied += 1;
            }
        }

        Ok(applied)
    }

    async fn revert(&self) -> Result<Option<i64>, DomainError> {
        let Some(current) = self.version().await? else {
            return Ok(None);
        };

        let migration = self
            .migrations
            .iter()
            .find(|m| m.version == current)
            .ok_or_else(|| {
                DomainError::storage(format!("Unknown applied migration version {}", current))
            })?;

        self.revert_migration(migration).await?;
        Ok(Some(current))
    }

    async fn version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        let query = format!("SELECT MAX(version) FROM {}._migrations", self.schema);

        sqlx::query_scalar(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version, applied in ascending order
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
    /// SQL to run when reverting the migration
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Migrations creating the users and addresses tables inside `schema`
pub fn users_schema_migrations(schema: &str) -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create addresses table",
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {schema}.addresses (
                    id BIGSERIAL PRIMARY KEY,
                    country VARCHAR(255) NOT NULL,
                    city VARCHAR(255) NOT NULL,
                    street VARCHAR(255) NOT NULL,
                    home_number VARCHAR(255) NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_addresses_country ON {schema}.addresses(country);
                "#
            ),
            format!("DROP TABLE IF EXISTS {schema}.addresses;"),
        ),
        Migration::new(
            2,
            "Create users table",
            format!(
                r#"
                CREATE TABLE IF NOT EXISTS {schema}.users (
                    id BIGSERIAL PRIMARY KEY,
                    first_name VARCHAR(255) NOT NULL,
                    last_name VARCHAR(255) NOT NULL,
                    birthday DATE NOT NULL,
                    login VARCHAR(255) NOT NULL UNIQUE,
                    password VARCHAR(255) NOT NULL,
                    description VARCHAR(25000),
                    address_id BIGINT REFERENCES {schema}.addresses(id) ON DELETE SET NULL
                );
                CREATE INDEX IF NOT EXISTS idx_users_name ON {schema}.users(first_name, last_name);
                CREATE INDEX IF NOT EXISTS idx_users_birthday ON {schema}.users(birthday);
                "#
            ),
            format!("DROP TABLE IF EXISTS {schema}.users;"),
        ),
    ]
}

/// Run all pending users schema migrations
pub async fn run_users_schema_migrations(pool: &PgPool, schema: &str) -> Result<usize, DomainError> {
    PostgresMigrator::new(pool.clone(), schema)?.run().await
}
