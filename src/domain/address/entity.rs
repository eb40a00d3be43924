//! Address entity and related types

use serde::{Deserialize, Serialize};

/// Address identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(i64);

impl AddressId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AddressId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address fields supplied by a caller before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    pub country: String,
    pub city: String,
    pub street: String,
    pub home_number: String,
}

impl AddressDraft {
    pub fn new(
        country: impl Into<String>,
        city: impl Into<String>,
        street: impl Into<String>,
        home_number: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
            street: street.into(),
            home_number: home_number.into(),
        }
    }
}

/// Persisted address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    id: AddressId,
    country: String,
    city: String,
    street: String,
    home_number: String,
}

impl Address {
    /// Build a persisted address from its id and field values
    pub fn new(id: AddressId, draft: AddressDraft) -> Self {
        Self {
            id,
            country: draft.country,
            city: draft.city,
            street: draft.street,
            home_number: draft.home_number,
        }
    }

    pub fn id(&self) -> AddressId {
        self.id
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn home_number(&self) -> &str {
        &self.home_number
    }

    /// Overwrite every field, keeping the id
    pub fn replace(&mut self, draft: AddressDraft) {
        self.country = draft.country;
        self.city = draft.city;
        self.street = draft.street;
        self.home_number = draft.home_number;
    }

    pub fn to_draft(&self) -> AddressDraft {
        AddressDraft::new(
            &self.country,
            &self.city,
            &self.street,
            &self.home_number,
        )
    }
}
