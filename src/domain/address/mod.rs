//! Address domain
//!
//! Addresses are owned by at most one user. They are persisted together with
//! their owner but can also be managed on their own.

mod entity;
mod repository;
mod validation;

pub use entity::{Address, AddressDraft, AddressId};
pub use repository::AddressRepository;
pub use validation::{validate_address, AddressValidationError, MAX_ADDRESS_FIELD_LENGTH};

#[cfg(test)]
pub use repository::MockAddressRepository;
