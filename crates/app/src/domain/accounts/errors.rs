//! Accounts service errors.

use thiserror::Error;

use crate::{auth::password::PasswordError, storage::StoreError, validation::ValidationError};

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("an account with this email already exists")]
    DuplicateIdentity,

    #[error("account not found")]
    NotFound,

    #[error("invalid account data")]
    Validation(#[from] ValidationError),

    #[error("password hashing failed")]
    PasswordHash(#[from] PasswordError),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for AccountsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::DuplicateIdentity,
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
