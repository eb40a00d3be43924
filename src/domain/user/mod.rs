//! User domain
//!
//! This module provides domain types and traits for users, including the
//! user entity, field validation and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserDraft, UserId, UserRecord, GMAIL_MARKER};
pub use repository::UserRepository;
pub use validation::{
    validate_birthday, validate_description, validate_first_name, validate_last_name,
    validate_login, validate_password, validate_user_draft, UserValidationError,
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MIN_LOGIN_LENGTH, MIN_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
