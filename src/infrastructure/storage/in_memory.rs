//! In-memory relational store
//!
//! Useful for testing and development. Data is lost when the process terminates.
//! Users and addresses are kept in separate tables linked by address ID, the
//! same shape as the PostgreSQL schema, behind a single lock so that writes
//! touching both tables are atomic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::address::{Address, AddressDraft, AddressId};
use crate::domain::user::{User, UserId, UserRecord};
use crate::domain::DomainError;

/// Stored user row, referencing its address by ID
#[derive(Debug, Clone)]
pub(crate) struct UserRow {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub login: String,
    pub password_hash: String,
    pub description: Option<String>,
    pub address_id: Option<AddressId>,
}

/// Both tables plus their identity sequences
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: BTreeMap<UserId, UserRow>,
    pub addresses: BTreeMap<AddressId, Address>,
    last_user_id: i64,
    last_address_id: i64,
}

impl Tables {
    fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    fn next_address_id(&mut self) -> AddressId {
        self.last_address_id += 1;
        AddressId::new(self.last_address_id)
    }

    /// Join a user row with its address
    pub fn to_user(&self, id: UserId, row: &UserRow) -> User {
        let address = row
            .address_id
            .and_then(|address_id| self.addresses.get(&address_id).cloned());

        let record = UserRecord {
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            birthday: row.birthday,
            login: row.login.clone(),
            password_hash: row.password_hash.clone(),
            description: row.description.clone(),
            address: None,
        };

        User::new(id, record, address)
    }

    /// All users satisfying `predicate`, ordered by ID
    pub fn select_users<F>(&self, predicate: F) -> Vec<User>
    where
        F: Fn(&UserRow) -> bool,
    {
        self.users
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, row)| self.to_user(*id, row))
            .collect()
    }

    pub fn insert_address(&mut self, draft: AddressDraft) -> Address {
        let id = self.next_address_id();
        let address = Address::new(id, draft);
        self.addresses.insert(id, address.clone());
        address
    }

    /// Overwrite an address in place, returning `None` if it does not exist
    pub fn update_address(&mut self, id: AddressId, draft: AddressDraft) -> Option<Address> {
        let address = self.addresses.get_mut(&id)?;
        address.replace(draft);
        Some(address.clone())
    }

    /// Delete an address and clear every user reference to it
    pub fn delete_address(&mut self, id: AddressId) -> bool {
        if self.addresses.remove(&id).is_none() {
            return false;
        }

        for row in self.users.values_mut() {
            if row.address_id == Some(id) {
                row.address_id = None;
            }
        }

        true
    }

    fn ensure_login_free(&self, login: &str, except: Option<UserId>) -> Result<(), DomainError> {
        let taken = self
            .users
            .iter()
            .any(|(id, row)| row.login == login && Some(*id) != except);

        if taken {
            return Err(DomainError::conflict(format!(
                "Login '{}' already exists",
                login
            )));
        }

        Ok(())
    }

    /// Insert the address (if any) and then the user referencing it
    pub fn insert_user(&mut self, record: UserRecord) -> Result<User, DomainError> {
        self.ensure_login_free(&record.login, None)?;

        let address_id = record
            .address
            .clone()
            .map(|draft| self.insert_address(draft).id());

        let id = self.next_user_id();
        self.users.insert(id, row_from_record(record, address_id));

        let row = &self.users[&id];
        Ok(self.to_user(id, row))
    }

    /// Replace every field of a user, reconciling its owned address
    pub fn replace_user(&mut self, id: UserId, record: UserRecord) -> Result<User, DomainError> {
        let current_address = self
            .users
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?
            .address_id;

        self.ensure_login_free(&record.login, Some(id))?;

        let address_id = match (current_address, record.address.clone()) {
            (Some(existing), Some(draft)) => match self.update_address(existing, draft.clone()) {
                Some(address) => Some(address.id()),
                None => Some(self.insert_address(draft).id()),
            },
            (None, Some(draft)) => Some(self.insert_address(draft).id()),
            (_, None) => None,
        };

        self.users.insert(id, row_from_record(record, address_id));

        if let (Some(old), None) = (current_address, address_id) {
            self.delete_address(old);
        }

        let row = &self.users[&id];
        Ok(self.to_user(id, row))
    }

    /// Remove a user and its owned address
    pub fn remove_user(&mut self, id: UserId) -> bool {
        let Some(row) = self.users.remove(&id) else {
            return false;
        };

        if let Some(address_id) = row.address_id {
            self.delete_address(address_id);
        }

        true
    }
}

fn row_from_record(record: UserRecord, address_id: Option<AddressId>) -> UserRow {
    UserRow {
        first_name: record.first_name,
        last_name: record.last_name,
        birthday: record.birthday,
        login: record.login,
        password_hash: record.password_hash,
        description: record.description,
        address_id,
    }
}

/// Thread-safe in-memory database shared by the in-memory repositories
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    /// Creates a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}
