//! Storage factory for runtime storage selection

use std::sync::Arc;

use tracing::info;

use crate::domain::address::AddressRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::address::{InMemoryAddressRepository, PostgresAddressRepository};
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::in_memory::InMemoryDatabase;
use super::migrations::run_users_schema_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// User and address repositories backed by the same store
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub addresses: Arc<dyn AddressRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Factory for creating repository pairs
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates both repositories based on the configuration
    ///
    /// For PostgreSQL this connects a pool and applies pending schema
    /// migrations before returning.
    pub async fn create(config: &StorageConfig) -> Result<Repositories, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Self::create_in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let pool = connect_pool(pg_config).await?;

                let applied = run_users_schema_migrations(&pool, &pg_config.schema).await?;
                info!(schema = %pg_config.schema, applied, "Schema migrations checked");

                Ok(Repositories {
                    users: Arc::new(PostgresUserRepository::new(pool.clone())),
                    addresses: Arc::new(PostgresAddressRepository::new(pool)),
                })
            }
        }
    }

    /// Creates repositories sharing one in-memory database
    pub fn create_in_memory() -> Repositories {
        let database = Arc::new(InMemoryDatabase::new());

        Repositories {
            users: Arc::new(InMemoryUserRepository::new(database.clone())),
            addresses: Arc::new(InMemoryAddressRepository::new(database)),
        }
    }
}
