//! In-memory address repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::address::{Address, AddressDraft, AddressId, AddressRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryDatabase;

/// In-memory implementation of AddressRepository
#[derive(Debug, Clone)]
pub struct InMemoryAddressRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryAddressRepository {
    /// Create a repository over a database shared with the user repository
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

impl Default for InMemoryAddressRepository {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryDatabase::new()))
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepository {
    async fn get(&self, id: AddressId) -> Result<Option<Address>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.addresses.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Address>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.addresses.values().cloned().collect())
    }

    async fn create(&self, draft: AddressDraft) -> Result<Address, DomainError> {
        let mut tables = self.database.write().await;
        Ok(tables.insert_address(draft))
    }

    async fn update(&self, id: AddressId, draft: AddressDraft) -> Result<Address, DomainError> {
        let mut tables = self.database.write().await;

        tables
            .update_address(id, draft)
            .ok_or_else(|| DomainError::not_found(format!("Address '{}' not found", id)))
    }

    async fn delete(&self, id: AddressId) -> Result<bool, DomainError> {
        let mut tables = self.database.write().await;
        Ok(tables.delete_address(id))
    }

    async fn find_by_country(&self, country: &str) -> Result<Vec<Address>, DomainError> {
        let tables = self.database.read().await;

        Ok(tables
            .addresses
            .values()
            .filter(|a| a.country() == country)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.addresses.len())
    }
}
