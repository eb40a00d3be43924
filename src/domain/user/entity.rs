//! User entity and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::address::{Address, AddressDraft};

/// User identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User fields as supplied by a caller, with the password still in plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub login: String,
    pub password: String,
    pub description: Option<String>,
    pub address: Option<AddressDraft>,
}

/// User fields ready to be written to a store
///
/// Identical to [`UserDraft`] except that the password has been hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub login: String,
    pub password_hash: String,
    pub description: Option<String>,
    pub address: Option<AddressDraft>,
}

impl UserRecord {
    pub fn from_draft(draft: UserDraft, password_hash: impl Into<String>) -> Self {
        Self {
            first_name: draft.first_name,
            last_name: draft.last_name,
            birthday: draft.birthday,
            login: draft.login,
            password_hash: password_hash.into(),
            description: draft.description,
            address: draft.address,
        }
    }
}

/// Persisted user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    birthday: NaiveDate,
    login: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    description: Option<String>,
    address: Option<Address>,
}

impl User {
    /// Build a persisted user from its id, stored fields and resolved address
    pub fn new(id: UserId, record: UserRecord, address: Option<Address>) -> Self {
        Self {
            id,
            first_name: record.first_name,
            last_name: record.last_name,
            birthday: record.birthday,
            login: record.login,
            password_hash: record.password_hash,
            description: record.description,
            address,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn has_address(&self) -> bool {
        self.address.is_some()
    }

    /// Whether the login is a Gmail address
    pub fn is_gmail(&self) -> bool {
        self.login.contains(GMAIL_MARKER)
    }
}

/// Substring identifying Gmail logins
pub const GMAIL_MARKER: &str = "@gmail.com";
