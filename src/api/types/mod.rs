//! API types: error bodies, extractors and request payloads

pub mod error;
pub mod json;
pub mod params;
pub mod user;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use params::{Path, Query};
pub use user::{AddressPayload, BirthdayQuery, NameQuery, UserPayload};
