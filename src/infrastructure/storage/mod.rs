//! Storage infrastructure - PostgreSQL pool, schema migrations and the
//! in-memory database

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryDatabase;
pub use migrations::{
    run_users_schema_migrations, users_schema_migrations, Migration, Migrator, PostgresMigrator,
};
pub use postgres::{connect_pool, validate_schema_name, PostgresConfig};
