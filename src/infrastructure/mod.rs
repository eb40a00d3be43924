//! Infrastructure layer - persistence, password hashing, messaging and logging

pub mod address;
pub mod logging;
pub mod storage;
pub mod user;
