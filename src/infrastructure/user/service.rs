//! User service for user management and Gmail notifications

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::domain::user::{
    validate_user_draft, User, UserDraft, UserId, UserRecord, UserRepository, GMAIL_MARKER,
};
use crate::domain::DomainError;

use super::messaging::MessageSender;
use super::password::PasswordHasher;

/// User service
pub struct UserService<R, H, M>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher,
    M: MessageSender + ?Sized,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    sender: Arc<M>,
}

impl<R, H, M> std::fmt::Debug for UserService<R, H, M>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher,
    M: MessageSender + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("hasher", &self.hasher)
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl<R, H, M> UserService<R, H, M>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher,
    M: MessageSender + ?Sized,
{
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>, sender: Arc<M>) -> Self {
        Self {
            repository,
            hasher,
            sender,
        }
    }

    /// List all users
    pub async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Get a user by ID
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Validate and store a new user together with its address
    pub async fn create(&self, draft: UserDraft) -> Result<User, DomainError> {
        let record = self.prepare(draft)?;
        debug!(login = %record.login, "Creating user");

        self.repository.create(record).await
    }

    /// Replace every field of an existing user
    pub async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, DomainError> {
        let record = self.prepare(draft)?;

        if !self.repository.exists(id).await? {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        debug!(user_id = %id, "Updating user");
        self.repository.update(id, record).await
    }

    /// Delete a user and its address, returning what was removed
    pub async fn delete(&self, id: UserId) -> Result<User, DomainError> {
        let user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        debug!(user_id = %id, "Deleting user");
        self.repository.delete(id).await?;

        Ok(user)
    }

    /// Find users by exact first and last name
    pub async fn find_by_first_name_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<User>, DomainError> {
        self.repository
            .find_by_first_name_and_last_name(first_name, last_name)
            .await
    }

    /// Find users that have an address
    pub async fn find_with_addresses(&self) -> Result<Vec<User>, DomainError> {
        self.repository.find_with_address().await
    }

    /// Find users born strictly before `date`
    pub async fn find_born_before(&self, date: NaiveDate) -> Result<Vec<User>, DomainError> {
        self.repository.find_born_before(date).await
    }

    /// Send a message to every user with a Gmail login
    ///
    /// Returns the number of recipients.
    pub async fn send_message_to_gmail_users(&self) -> Result<usize, DomainError> {
        let recipients = self.repository.find_by_login_containing(GMAIL_MARKER).await?;
        debug!(count = recipients.len(), "Notifying Gmail users");

        for user in &recipients {
            self.sender.send(user.login());
        }

        Ok(recipients.len())
    }

    /// Count stored users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    fn prepare(&self, draft: UserDraft) -> Result<UserRecord, DomainError> {
        validate_user_draft(&draft, Utc::now().date_naive()).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            DomainError::validation(message)
        })?;

        let password_hash = self.hasher.hash(&draft.password)?;

        Ok(UserRecord::from_draft(draft, password_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::AddressDraft;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::messaging::MockMessageSender;
    use crate::infrastructure::user::password::verify_password;
    use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, LogMessageSender};

    type TestService = UserService<InMemoryUserRepository, Argon2Hasher, LogMessageSender>;

    fn create_service() -> TestService {
        UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(Argon2Hasher::new()),
            Arc::new(LogMessageSender::new()),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(first: &str, last: &str, login: &str, birthday: NaiveDate) -> UserDraft {
        UserDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            birthday,
            login: login.to_string(),
            password: "secret-password".to_string(),
            description: Some("Regular customer".to_string()),
            address: None,
        }
    }

    fn kharkiv() -> AddressDraft {
        AddressDraft::new("Ukraine", "Kharkiv", "Sumska", "12")
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let service = create_service();
        let mut new_user = draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1));
        new_user.address = Some(kharkiv());

        let user = service.create(new_user).await.unwrap();

        assert!(user.id().value() > 0);
        assert_eq!(user.address().unwrap().city(), "Kharkiv");
        assert_eq!(service.find_by_id(user.id()).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let service = create_service();

        let user = service
            .create(draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await
            .unwrap();

        assert_ne!(user.password_hash(), "secret-password");
        assert!(verify_password("secret-password", user.password_hash()));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let service = create_service();
        let mut invalid = draft("", "Petrenko", "ivan", Utc::now().date_naive());
        invalid.password = "1234".to_string();

        let result = service.create(invalid).await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert!(message.contains("First name"));
                assert!(message.contains("Birthday"));
                assert!(message.contains("Password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_names() {
        let service = create_service();
        let long_name = "a".repeat(300);

        let result = service
            .create(draft(&long_name, "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert!(message.contains("First name exceeds maximum length of 255"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_login_conflicts() {
        let service = create_service();
        service
            .create(draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await
            .unwrap();

        let result = service
            .create(draft("Other", "Person", "ivan@gmail.com", date(1991, 5, 1)))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_unknown_id() {
        let service = create_service();

        assert!(service.find_by_id(UserId::new(10_000)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let service = create_service();
        let user = service
            .create(draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await
            .unwrap();

        let mut replacement = draft("Petro", "Ivanenko", "petro@ukr.net", date(1985, 2, 3));
        replacement.password = "new-password-123".to_string();
        replacement.description = None;
        replacement.address = Some(kharkiv());
        let updated = service.update(user.id(), replacement).await.unwrap();

        let fetched = service.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
        assert_eq!(fetched.id(), user.id());
        assert_eq!(fetched.first_name(), "Petro");
        assert_eq!(fetched.last_name(), "Ivanenko");
        assert_eq!(fetched.login(), "petro@ukr.net");
        assert_eq!(fetched.birthday(), date(1985, 2, 3));
        assert!(fetched.description().is_none());
        assert!(fetched.has_address());
        assert_ne!(fetched.password_hash(), user.password_hash());
        assert!(verify_password("new-password-123", fetched.password_hash()));
        assert!(!verify_password("secret-password", fetched.password_hash()));
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_user_unchanged() {
        let service = create_service();
        let mut original = draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1));
        original.address = Some(kharkiv());
        let user = service.create(original).await.unwrap();

        let mut short_password = draft("Petro", "Ivanenko", "petro@ukr.net", date(1985, 2, 3));
        short_password.password = "1234".to_string();
        let result = service.update(user.id(), short_password).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let future_birthday = draft("Petro", "Ivanenko", "petro@ukr.net", date(2999, 1, 1));
        let result = service.update(user.id(), future_birthday).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let fetched = service.find_by_id(user.id()).await.unwrap();
        assert_eq!(fetched, Some(user));
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_user_creates_nothing() {
        let service = create_service();

        let result = service
            .update(
                UserId::new(10_000),
                draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)),
            )
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = create_service();
        let user = service
            .create(draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await
            .unwrap();

        let removed = service.delete(user.id()).await.unwrap();

        assert_eq!(removed, user);
        assert!(service.find_by_id(user.id()).await.unwrap().is_none());
        assert!(matches!(
            service.delete(user.id()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_queries_return_matching_subsets() {
        let service = create_service();
        let mut with_address = draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1));
        with_address.address = Some(kharkiv());
        service.create(with_address).await.unwrap();
        service
            .create(draft("Ivan", "Sydorenko", "sydorenko@ukr.net", date(2001, 1, 1)))
            .await
            .unwrap();
        service
            .create(draft("Olha", "Petrenko", "olha@gmail.com", date(2000, 3, 20)))
            .await
            .unwrap();

        let by_name = service
            .find_by_first_name_and_last_name("Ivan", "Petrenko")
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].login(), "ivan@gmail.com");

        let with_addresses = service.find_with_addresses().await.unwrap();
        assert_eq!(with_addresses.len(), 1);
        assert!(with_addresses[0].has_address());

        let older = service.find_born_before(date(2000, 3, 20)).await.unwrap();
        assert_eq!(older.len(), 1);
        assert_eq!(older[0].first_name(), "Ivan");
        assert_eq!(older[0].last_name(), "Petrenko");
    }

    #[tokio::test]
    async fn test_send_message_to_gmail_users() {
        let repository = Arc::new(InMemoryUserRepository::default());
        let seed = UserService::new(
            repository.clone(),
            Arc::new(Argon2Hasher::new()),
            Arc::new(LogMessageSender::new()),
        );
        seed.create(draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await
            .unwrap();
        seed.create(draft("Olha", "Petrenko", "olha@ukr.net", date(1992, 5, 1)))
            .await
            .unwrap();
        let before = seed.find_all().await.unwrap();

        let mut sender = MockMessageSender::new();
        sender
            .expect_send()
            .withf(|email| email.to_string() == "ivan@gmail.com")
            .times(1)
            .return_const(());

        let service = UserService::new(repository, Arc::new(Argon2Hasher::new()), Arc::new(sender));

        assert_eq!(service.send_message_to_gmail_users().await.unwrap(), 1);
        assert_eq!(service.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_send_message_with_no_gmail_users() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_login_containing()
            .withf(|fragment| fragment.to_string() == GMAIL_MARKER)
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut sender = MockMessageSender::new();
        sender.expect_send().never();

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(Argon2Hasher::new()),
            Arc::new(sender),
        );

        assert_eq!(service.send_message_to_gmail_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get()
            .returning(|_| Err(DomainError::storage("connection refused")));

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(Argon2Hasher::new()),
            Arc::new(LogMessageSender::new()),
        );

        assert!(matches!(
            service.delete(UserId::new(1)).await,
            Err(DomainError::Storage { .. })
        ));
    }

    #[derive(Debug)]
    struct LengthHasher;

    impl PasswordHasher for LengthHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{}", password.len()))
        }
    }

    #[tokio::test]
    async fn test_service_stores_hasher_output() {
        let service = UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(LengthHasher),
            Arc::new(LogMessageSender::new()),
        );

        let user = service
            .create(draft("Ivan", "Petrenko", "ivan@gmail.com", date(1990, 5, 1)))
            .await
            .unwrap();

        assert_eq!(user.password_hash(), "hashed:15");
    }
}
