//! Receipts service errors.

use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ReceiptsServiceError {
    #[error("receipt not found")]
    NotFound,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ReceiptsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
