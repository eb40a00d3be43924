//! In-memory user repository implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::user::{User, UserId, UserRecord, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::InMemoryDatabase;

/// In-memory implementation of UserRepository
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    database: Arc<InMemoryDatabase>,
}

impl InMemoryUserRepository {
    /// Create a repository over a database shared with the address repository
    pub fn new(database: Arc<InMemoryDatabase>) -> Self {
        Self { database }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryDatabase::new()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.users.get(&id).map(|row| tables.to_user(id, row)))
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.select_users(|_| true))
    }

    async fn create(&self, record: UserRecord) -> Result<User, DomainError> {
        let mut tables = self.database.write().await;
        tables.insert_user(record)
    }

    async fn update(&self, id: UserId, record: UserRecord) -> Result<User, DomainError> {
        let mut tables = self.database.write().await;
        tables.replace_user(id, record)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut tables = self.database.write().await;
        Ok(tables.remove_user(id))
    }

    async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<User>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.select_users(|row| row.first_name == first_name && row.last_name == last_name))
    }

    async fn find_with_address(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.select_users(|row| row.address_id.is_some()))
    }

    async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.select_users(|row| row.birthday < date))
    }

    async fn find_by_login_containing(&self, fragment: &str) -> Result<Vec<User>, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.select_users(|row| row.login.contains(fragment)))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let tables = self.database.read().await;
        Ok(tables.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::{AddressDraft, AddressRepository};
    use crate::infrastructure::address::InMemoryAddressRepository;

    fn record(first: &str, last: &str, login: &str, born: (i32, u32, u32)) -> UserRecord {
        UserRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            birthday: NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap(),
            login: login.to_string(),
            password_hash: "hash".to_string(),
            description: None,
            address: None,
        }
    }

    fn kharkiv() -> AddressDraft {
        AddressDraft::new("Ukraine", "Kharkiv", "Sumska", "12")
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::default();

        let user = repo
            .create(record("Ivan", "Petrenko", "ivan@gmail.com", (1990, 5, 1)))
            .await
            .unwrap();

        let fetched = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(fetched, user);
        assert!(repo.exists(user.id()).await.unwrap());
        assert!(!repo.exists(UserId::new(99)).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_with_address_is_visible_to_address_repository() {
        let database = Arc::new(InMemoryDatabase::new());
        let users = InMemoryUserRepository::new(database.clone());
        let addresses = InMemoryAddressRepository::new(database);

        let mut with_address = record("Ivan", "Petrenko", "ivan@gmail.com", (1990, 5, 1));
        with_address.address = Some(kharkiv());
        let user = users.create(with_address).await.unwrap();

        let address_id = user.address().unwrap().id();
        assert_eq!(
            addresses.get(address_id).await.unwrap().unwrap().city(),
            "Kharkiv"
        );
        assert_eq!(addresses.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::default();

        let result = repo
            .update(UserId::new(5), record("A", "B", "ab@gmail.com", (1990, 1, 1)))
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_user_removes_address() {
        let database = Arc::new(InMemoryDatabase::new());
        let users = InMemoryUserRepository::new(database.clone());
        let addresses = InMemoryAddressRepository::new(database);

        let mut with_address = record("Ivan", "Petrenko", "ivan@gmail.com", (1990, 5, 1));
        with_address.address = Some(kharkiv());
        let user = users.create(with_address).await.unwrap();

        assert!(users.delete(user.id()).await.unwrap());
        assert!(!users.delete(user.id()).await.unwrap());
        assert_eq!(addresses.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let repo = InMemoryUserRepository::default();
        repo.create(record("Ivan", "Petrenko", "ivan@gmail.com", (1990, 5, 1)))
            .await
            .unwrap();
        repo.create(record("ivan", "Petrenko", "ivan2@gmail.com", (1990, 5, 1)))
            .await
            .unwrap();

        let found = repo
            .find_by_first_name_and_last_name("Ivan", "Petrenko")
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].login(), "ivan@gmail.com");
    }

    #[tokio::test]
    async fn test_find_born_before_is_strict() {
        let repo = InMemoryUserRepository::default();
        repo.create(record("Old", "User", "old@gmail.com", (1980, 1, 1)))
            .await
            .unwrap();
        repo.create(record("Edge", "User", "edge@gmail.com", (1990, 1, 1)))
            .await
            .unwrap();

        let found = repo
            .find_born_before(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name(), "Old");
    }

    #[tokio::test]
    async fn test_find_with_address_and_login_fragment() {
        let repo = InMemoryUserRepository::default();
        let mut with_address = record("Ivan", "Petrenko", "ivan@gmail.com", (1990, 5, 1));
        with_address.address = Some(kharkiv());
        repo.create(with_address).await.unwrap();
        repo.create(record("Olha", "Shevchenko", "olha@ukr.net", (1992, 3, 4)))
            .await
            .unwrap();

        let with_addresses = repo.find_with_address().await.unwrap();
        assert_eq!(with_addresses.len(), 1);
        assert_eq!(with_addresses[0].first_name(), "Ivan");

        let gmail = repo.find_by_login_containing("@gmail.com").await.unwrap();
        assert_eq!(gmail.len(), 1);
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
