//! User request payloads and query parameters

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::address::AddressDraft;
use crate::domain::user::UserDraft;

/// Body of `POST /users` and `PUT /users/{id}`
///
/// An `id` field, if sent, is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[validate(length(min = 1, max = 255, message = "First name must be 1 to 255 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1 to 255 characters"))]
    pub last_name: String,
    pub birthday: NaiveDate,
    #[validate(email, length(min = 5))]
    pub login: String,
    #[validate(length(min = 5))]
    pub password: String,
    #[validate(length(max = 25000))]
    pub description: Option<String>,
    #[validate(nested)]
    pub address: Option<AddressPayload>,
}

/// Address embedded in a user payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[validate(length(min = 1, max = 255))]
    pub country: String,
    #[validate(length(min = 1, max = 255))]
    pub city: String,
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 255))]
    pub home_number: String,
}

impl From<AddressPayload> for AddressDraft {
    fn from(payload: AddressPayload) -> Self {
        AddressDraft::new(
            payload.country,
            payload.city,
            payload.street,
            payload.home_number,
        )
    }
}

impl From<UserPayload> for UserDraft {
    fn from(payload: UserPayload) -> Self {
        UserDraft {
            first_name: payload.first_name,
            last_name: payload.last_name,
            birthday: payload.birthday,
            login: payload.login,
            password: payload.password,
            description: payload.description,
            address: payload.address.map(AddressDraft::from),
        }
    }
}

/// `GET /users/name?firstName=&lastName=`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameQuery {
    pub first_name: String,
    pub last_name: String,
}

/// `GET /users/olderThan?date=YYYY-MM-DD`
#[derive(Debug, Clone, Deserialize)]
pub struct BirthdayQuery {
    pub date: NaiveDate,
}
