// seedbase-core/src/error.rs

use thiserror::Error;

use crate::model::ValidationError;

pub type Result<T> = std::result::Result<T, SeedBaseError>;

/// Errors surfaced by the store boundary and the fixture loader.
///
/// Every variant is fatal to a loading run; nothing here is retried.
#[derive(Error, Debug)]
pub enum SeedBaseError {
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Duplicate key {value} for unique index '{field}' in collection '{collection}'")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Store unreachable. Raised by remote implementations of the
    /// store trait; the embedded store never produces it.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for SeedBaseError {
    fn from(err: serde_json::Error) -> Self {
        SeedBaseError::Serialization(err.to_string())
    }
}
