//! Address repository trait

use async_trait::async_trait;

use super::entity::{Address, AddressDraft, AddressId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for address persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Get an address by its ID
    async fn get(&self, id: AddressId) -> Result<Option<Address>, DomainError>;

    /// List all addresses ordered by ID
    async fn list(&self) -> Result<Vec<Address>, DomainError>;

    /// Insert a new address and return it with its assigned ID
    async fn create(&self, draft: AddressDraft) -> Result<Address, DomainError>;

    /// Overwrite every field of an existing address
    async fn update(&self, id: AddressId, draft: AddressDraft) -> Result<Address, DomainError>;

    /// Delete an address, clearing any user reference to it
    async fn delete(&self, id: AddressId) -> Result<bool, DomainError>;

    /// Find addresses whose country equals the given value exactly
    async fn find_by_country(&self, country: &str) -> Result<Vec<Address>, DomainError>;

    /// Count stored addresses
    async fn count(&self) -> Result<usize, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_address_repository() {
        let mut mock = MockAddressRepository::new();
        mock.expect_find_by_country()
            .withf(|country| country == "Ukraine")
            .returning(|_| {
                Ok(vec![Address::new(
                    AddressId::new(1),
                    AddressDraft::new("Ukraine", "Kyiv", "Khreshchatyk", "22"),
                )])
            });

        let result = mock.find_by_country("Ukraine").await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].city(), "Kyiv");
    }
}
