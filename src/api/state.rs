//! Application state for shared services

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::address::{Address, AddressDraft, AddressId, AddressRepository};
use crate::domain::user::{User, UserDraft, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::address::AddressService;
use crate::infrastructure::user::{MessageSender, PasswordHasher, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub address_service: Arc<dyn AddressServiceTrait>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        address_service: Arc<dyn AddressServiceTrait>,
    ) -> Self {
        Self {
            user_service,
            address_service,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn create(&self, draft: UserDraft) -> Result<User, DomainError>;
    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, DomainError>;
    async fn delete(&self, id: UserId) -> Result<User, DomainError>;
    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<User>, DomainError>;
    async fn find_with_addresses(&self) -> Result<Vec<User>, DomainError>;
    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, DomainError>;
    /// Notify every Gmail user, returning the number of recipients
    async fn send_message_to_gmail_users(&self) -> Result<usize, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for address service operations
#[async_trait::async_trait]
pub trait AddressServiceTrait: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Address>, DomainError>;
    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, DomainError>;
    async fn create(&self, draft: AddressDraft) -> Result<Address, DomainError>;
    async fn update(&self, id: AddressId, draft: AddressDraft) -> Result<Address, DomainError>;
    async fn delete(&self, id: AddressId) -> Result<Address, DomainError>;
    async fn find_by_country(&self, country: &str) -> Result<Vec<Address>, DomainError>;
    async fn find_in_ukraine(&self) -> Result<Vec<Address>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H, M> UserServiceTrait for UserService<R, H, M>
where
    R: UserRepository + ?Sized + 'static,
    H: PasswordHasher + 'static,
    M: MessageSender + ?Sized + 'static,
{
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        UserService::find_all(self).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        UserService::find_by_id(self, id).await
    }

    async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        UserService::create(self, draft).await
    }

    async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, DomainError> {
        UserService::update(self, id, draft).await
    }

    async fn delete(&self, id: UserId) -> Result<User, DomainError> {
        UserService::delete(self, id).await
    }

    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<User>, DomainError> {
        UserService::find_by_first_name_and_last_name(self, first_name, last_name).await
    }

    async fn find_with_addresses(&self) -> Result<Vec<User>, DomainError> {
        UserService::find_with_addresses(self).await
    }

    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, DomainError> {
        UserService::find_born_before(self, date).await
    }

    async fn send_message_to_gmail_users(&self) -> Result<usize, DomainError> {
        UserService::send_message_to_gmail_users(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: AddressRepository + ?Sized + 'static> AddressServiceTrait for AddressService<R> {
    async fn find_all(&self) -> Result<Vec<Address>, DomainError> {
        AddressService::find_all(self).await
    }

    async fn find_by_id(&self, id: AddressId) -> Result<Option<Address>, DomainError> {
        AddressService::find_by_id(self, id).await
    }

    async fn create(&self, draft: AddressDraft) -> Result<Address, DomainError> {
        AddressService::create(self, draft).await
    }

    async fn update(&self, id: AddressId, draft: AddressDraft) -> Result<Address, DomainError> {
        AddressService::update(self, id, draft).await
    }

    async fn delete(&self, id: AddressId) -> Result<Address, DomainError> {
        AddressService::delete(self, id).await
    }

    async fn find_by_country(&self, country: &str) -> Result<Vec<Address>, DomainError> {
        AddressService::find_by_country(self, country).await
    }

    async fn find_in_ukraine(&self) -> Result<Vec<Address>, DomainError> {
        AddressService::find_in_ukraine(self).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        AddressService::count(self).await
    }
}
