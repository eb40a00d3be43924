//! Address infrastructure module
//!
//! PostgreSQL and in-memory address repositories plus the address service.

mod postgres_repository;
mod repository;
mod service;

pub(crate) use postgres_repository::{delete_address, insert_address, update_address};
pub use postgres_repository::PostgresAddressRepository;
pub use repository::InMemoryAddressRepository;
pub use service::{AddressService, UKRAINE};
