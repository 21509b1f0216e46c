//! Auth service errors.

use thiserror::Error;

use crate::{
    auth::{mail::MailError, password::PasswordError, token::TokenError},
    domain::accounts::AccountsServiceError,
    storage::StoreError,
    validation::ValidationError,
};

/// Why a reset token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Invalid,
    Expired,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("an account with this email already exists")]
    DuplicateIdentity,

    #[error("account not found")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("reset token rejected: {0:?}")]
    InvalidOrExpiredToken(TokenRejection),

    #[error("new password must differ from the current one")]
    PasswordReused,

    #[error("invalid input")]
    Validation(#[from] ValidationError),

    #[error("mail delivery failed")]
    TransportFailure(#[from] MailError),

    #[error("password hashing failed")]
    PasswordHash(#[from] PasswordError),

    #[error("failed to sign token")]
    Signing(#[source] TokenError),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::DuplicateIdentity,
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl From<AccountsServiceError> for AuthError {
    fn from(error: AccountsServiceError) -> Self {
        match error {
            AccountsServiceError::DuplicateIdentity => Self::DuplicateIdentity,
            AccountsServiceError::NotFound => Self::NotFound,
            AccountsServiceError::Validation(error) => Self::Validation(error),
            AccountsServiceError::PasswordHash(error) => Self::PasswordHash(error),
            AccountsServiceError::Storage(error) => Self::Storage(error),
        }
    }
}
