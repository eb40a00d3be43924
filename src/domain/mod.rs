//! Domain layer - Core entities, validation and repository traits

pub mod address;
pub mod error;
pub mod user;

pub use address::{Address, AddressDraft, AddressId, AddressRepository};
pub use error::DomainError;
pub use user::{User, UserDraft, UserId, UserRecord, UserRepository};
