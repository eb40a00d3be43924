//! Address service for standalone address management

use std::sync::Arc;

use tracing::debug;

use crate::domain::address::{
    validate_address, Address, AddressDraft, AddressId, AddressRepository,
};
use crate::domain::DomainError;

/// Country matched by [`AddressService::find_in_ukraine`]
pub const UKRAINE: &str = "Ukraine";

/// Address service
pub struct AddressService<R: AddressRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AddressRepository + ?Sized> std::fmt::Debug for AddressService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressService").finish_non_exhaustive()
    }
}

impl<R: AddressRepository + ?Sized> AddressService<R> {
    /// Create a new address service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new address
    pub async fn create(&self, draft: AddressDraft) -> Result<Address, DomainError> {
        check_address(&draft)?;
        debug!(country = %draft.country, city = %draft.city, "Creating address");

        self.repository.create(draft).await
    }

    /// List all addresses
    pub async fn find_all(&self) -> Result<Vec<Address>, DomainError> {
        self.repository.list().await
    }

    /// Get an address by ID
    pub async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, DomainError> {
        self.repository.get(id).await
    }

    /// Replace every field of an existing address
    pub async fn update(&self, id: AddressId, draft: AddressDraft) -> Result<Address, DomainError> {
        check_address(&draft)?;

        if self.repository.get(id).await?.is_none() {
            return Err(DomainError::not_found(format!("Address '{}' not found", id)));
        }

        debug!(address_id = %id, "Updating address");
        self.repository.update(id, draft).await
    }

    /// Delete an address, returning what was removed
    pub async fn delete(&self, id: AddressId) -> Result<Address, DomainError> {
        let address = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Address '{}' not found", id)))?;

        debug!(address_id = %id, "Deleting address");
        self.repository.delete(id).await?;

        Ok(address)
    }

    /// Find addresses in the given country (exact match)
    pub async fn find_by_country(&self, country: &str) -> Result<Vec<Address>, DomainError> {
        self.repository.find_by_country(country).await
    }

    /// Find addresses in Ukraine
    pub async fn find_in_ukraine(&self) -> Result<Vec<Address>, DomainError> {
        self.find_by_country(UKRAINE).await
    }

    /// Count stored addresses
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

fn check_address(draft: &AddressDraft) -> Result<(), DomainError> {
    validate_address(draft).map_err(|errors| {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        DomainError::validation(message)
    })
}
