//! User infrastructure module
//!
//! Argon2 password hashing, PostgreSQL and in-memory repositories, the
//! log-only message sender and the user service.

mod messaging;
mod password;
mod postgres_repository;
mod repository;
mod service;

pub use messaging::{LogMessageSender, MessageSender};
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
