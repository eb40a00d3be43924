//! User validation utilities

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidateEmail;

use super::entity::UserDraft;
use crate::domain::address::{validate_address, AddressValidationError};

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("First name cannot be empty")]
    EmptyFirstName,

    #[error("Last name cannot be empty")]
    EmptyLastName,

    #[error("First name exceeds maximum length of {0} characters")]
    FirstNameTooLong(usize),

    #[error("Last name exceeds maximum length of {0} characters")]
    LastNameTooLong(usize),

    #[error("Birthday must be in the past")]
    BirthdayNotInPast,

    #[error("Login must be a valid email address")]
    InvalidLogin,

    #[error("Login is too short. Minimum length is {0} characters")]
    LoginTooShort(usize),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Description exceeds maximum length of {0} characters")]
    DescriptionTooLong(usize),

    #[error(transparent)]
    Address(#[from] AddressValidationError),
}

pub const MAX_NAME_LENGTH: usize = 255;
pub const MIN_LOGIN_LENGTH: usize = 5;
pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_DESCRIPTION_LENGTH: usize = 25_000;

pub fn validate_first_name(first_name: &str) -> Result<(), UserValidationError> {
    if first_name.trim().is_empty() {
        return Err(UserValidationError::EmptyFirstName);
    }

    if first_name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::FirstNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

pub fn validate_last_name(last_name: &str) -> Result<(), UserValidationError> {
    if last_name.trim().is_empty() {
        return Err(UserValidationError::EmptyLastName);
    }

    if last_name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::LastNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a birthday
///
/// The date must be strictly earlier than `today`.
pub fn validate_birthday(birthday: NaiveDate, today: NaiveDate) -> Result<(), UserValidationError> {
    if birthday >= today {
        return Err(UserValidationError::BirthdayNotInPast);
    }

    Ok(())
}

/// Validate a login
///
/// Rules:
/// - Minimum 5 characters
/// - Must have the shape of an email address
pub fn validate_login(login: &str) -> Result<(), UserValidationError> {
    if login.chars().count() < MIN_LOGIN_LENGTH {
        return Err(UserValidationError::LoginTooShort(MIN_LOGIN_LENGTH));
    }

    if !login.validate_email() {
        return Err(UserValidationError::InvalidLogin);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), UserValidationError> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(UserValidationError::DescriptionTooLong(MAX_DESCRIPTION_LENGTH))
        }
        _ => Ok(()),
    }
}

/// Run every field check against a draft, collecting all failures
pub fn validate_user_draft(
    draft: &UserDraft,
    today: NaiveDate,
) -> Result<(), Vec<UserValidationError>> {
    let mut errors: Vec<UserValidationError> = [
        validate_first_name(&draft.first_name),
        validate_last_name(&draft.last_name),
        validate_birthday(draft.birthday, today),
        validate_login(&draft.login),
        validate_password(&draft.password),
        validate_description(draft.description.as_deref()),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if let Some(address) = &draft.address {
        if let Err(address_errors) = validate_address(address) {
            errors.extend(address_errors.into_iter().map(UserValidationError::from));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::AddressDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_draft() -> UserDraft {
        UserDraft {
            first_name: "New".to_string(),
            last_name: "User".to_string(),
            birthday: date(1995, 3, 20),
            login: "newuser@gmail.com".to_string(),
            password: "hello users".to_string(),
            description: Some("New test user".to_string()),
            address: Some(AddressDraft::new("Ukraine", "Kharkiv", "Sumska", "12")),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_user_draft(&valid_draft(), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_blank_names() {
        assert_eq!(validate_first_name(" "), Err(UserValidationError::EmptyFirstName));
        assert_eq!(validate_last_name(""), Err(UserValidationError::EmptyLastName));
        assert!(validate_first_name("First").is_ok());
    }

    #[test]
    fn test_names_fit_column_width() {
        assert!(validate_first_name(&"a".repeat(255)).is_ok());
        assert_eq!(
            validate_first_name(&"a".repeat(300)),
            Err(UserValidationError::FirstNameTooLong(255))
        );
        assert_eq!(
            validate_last_name(&"b".repeat(256)),
            Err(UserValidationError::LastNameTooLong(255))
        );
    }

    #[test]
    fn test_birthday_must_be_strictly_past() {
        let today = date(2024, 6, 1);

        assert!(validate_birthday(date(2024, 5, 31), today).is_ok());
        assert_eq!(
            validate_birthday(today, today),
            Err(UserValidationError::BirthdayNotInPast)
        );
        assert_eq!(
            validate_birthday(date(2030, 1, 1), today),
            Err(UserValidationError::BirthdayNotInPast)
        );
    }

    #[test]
    fn test_login_rules() {
        assert!(validate_login("user@gmail.com").is_ok());
        assert_eq!(
            validate_login("a@b"),
            Err(UserValidationError::LoginTooShort(5))
        );
        assert_eq!(
            validate_login("not-an-email"),
            Err(UserValidationError::InvalidLogin)
        );
    }

    #[test]
    fn test_password_too_short() {
        assert!(validate_password("12345").is_ok());
        assert_eq!(
            validate_password("1234"),
            Err(UserValidationError::PasswordTooShort(5))
        );
    }

    #[test]
    fn test_description_length() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some(&"a".repeat(25_000))).is_ok());
        assert_eq!(
            validate_description(Some(&"a".repeat(25_001))),
            Err(UserValidationError::DescriptionTooLong(25_000))
        );
    }

    #[test]
    fn test_draft_collects_all_errors() {
        let mut draft = valid_draft();
        draft.login = "nope".to_string();
        draft.password = "1".to_string();
        draft.address = Some(AddressDraft::new("Ukraine", "", "Sumska", "12"));

        let errors = validate_user_draft(&draft, date(2024, 1, 1)).unwrap_err();

        assert_eq!(
            errors,
            vec![
                UserValidationError::LoginTooShort(5),
                UserValidationError::PasswordTooShort(5),
                UserValidationError::Address(AddressValidationError::EmptyCity),
            ]
        );
    }
}
