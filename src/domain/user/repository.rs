//! User repository trait

use async_trait::async_trait;
use chrono::NaiveDate;

use super::entity::{User, UserId, UserRecord};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository trait for user storage
///
/// Implementations persist a user's owned address together with the user:
/// the address row is written first, then the user row referencing it, as a
/// single atomic step.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users ordered by ID
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Insert a new user (and its address, if any)
    async fn create(&self, record: UserRecord) -> Result<User, DomainError>;

    /// Replace every field of an existing user, keeping its ID
    ///
    /// An existing owned address is updated in place, a new one is inserted,
    /// and an address dropped from the record is deleted.
    async fn update(&self, id: UserId, record: UserRecord) -> Result<User, DomainError>;

    /// Delete a user together with its owned address
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Find users matching both names exactly (case-sensitive)
    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<User>, DomainError>;

    /// Find users that reference an address
    async fn find_with_address(&self) -> Result<Vec<User>, DomainError>;

    /// Find users whose birthday is strictly before the given date
    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, DomainError>;

    /// Find users whose login contains the given fragment, without writing
    async fn find_by_login_containing(&self, fragment: &str) -> Result<Vec<User>, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a user ID exists
    async fn exists(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
