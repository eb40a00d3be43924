//! Users service
//!
//! A CRUD HTTP service for users and their optional addresses, backed by
//! PostgreSQL or an in-memory store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::address::AddressService;
use infrastructure::storage::{Repositories, StorageConfig, StorageFactory, StorageType};
use infrastructure::user::{Argon2Hasher, LogMessageSender, UserService};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_backend = StorageType::from_str(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend '{}'", config.storage.backend)
    })?;

    info!("Storage backend: {:?}", storage_backend);

    let storage_config = match storage_backend {
        StorageType::InMemory => StorageConfig::in_memory(),
        StorageType::Postgres => {
            info!(schema = %config.database.schema, "Connecting to PostgreSQL...");
            StorageConfig::postgres(config.database.to_postgres_config())
        }
    };

    let repositories = StorageFactory::create(&storage_config).await?;
    info!("Storage initialized");

    Ok(build_state(repositories))
}

/// Create an application state over a fresh in-memory store
pub fn create_in_memory_app_state() -> AppState {
    build_state(StorageFactory::create_in_memory())
}

fn build_state(repositories: Repositories) -> AppState {
    let user_service = UserService::new(
        repositories.users,
        Arc::new(Argon2Hasher::new()),
        Arc::new(LogMessageSender::new()),
    );
    let address_service = AddressService::new(repositories.addresses);

    AppState::new(Arc::new(user_service), Arc::new(address_service))
}
