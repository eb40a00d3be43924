//! Address validation utilities

use thiserror::Error;

use super::entity::AddressDraft;

/// Errors that can occur during address validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AddressValidationError {
    #[error("Address country cannot be empty")]
    EmptyCountry,

    #[error("Address city cannot be empty")]
    EmptyCity,

    #[error("Address street cannot be empty")]
    EmptyStreet,

    #[error("Address home number cannot be empty")]
    EmptyHomeNumber,

    #[error("Address {field} exceeds maximum length of {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
}

pub const MAX_ADDRESS_FIELD_LENGTH: usize = 255;

/// Validate that every address field is populated and fits its column
///
/// All failures are collected so the caller can report them together.
pub fn validate_address(draft: &AddressDraft) -> Result<(), Vec<AddressValidationError>> {
    let checks = [
        (&draft.country, "country", AddressValidationError::EmptyCountry),
        (&draft.city, "city", AddressValidationError::EmptyCity),
        (&draft.street, "street", AddressValidationError::EmptyStreet),
        (&draft.home_number, "home number", AddressValidationError::EmptyHomeNumber),
    ];

    let errors: Vec<AddressValidationError> = checks
        .into_iter()
        .filter_map(|(value, field, empty)| {
            if value.trim().is_empty() {
                Some(empty)
            } else if value.chars().count() > MAX_ADDRESS_FIELD_LENGTH {
                Some(AddressValidationError::FieldTooLong {
                    field,
                    max: MAX_ADDRESS_FIELD_LENGTH,
                })
            } else {
                None
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        let draft = AddressDraft::new("Ukraine", "Kharkiv", "Sumska", "12");
        assert!(validate_address(&draft).is_ok());
    }

    #[test]
    fn test_blank_fields_are_all_reported() {
        let draft = AddressDraft::new("", "Kharkiv", "  ", "");

        assert_eq!(
            validate_address(&draft),
            Err(vec![
                AddressValidationError::EmptyCountry,
                AddressValidationError::EmptyStreet,
                AddressValidationError::EmptyHomeNumber,
            ])
        );
    }

    #[test]
    fn test_long_fields_are_rejected() {
        let draft = AddressDraft::new("Ukraine", "k".repeat(256), "Sumska", "12");

        assert_eq!(
            validate_address(&draft),
            Err(vec![AddressValidationError::FieldTooLong {
                field: "city",
                max: 255,
            }])
        );
    }
}
