//! Carts service errors.

use thiserror::Error;

use crate::{
    domain::products::records::ProductUuid, storage::StoreError, validation::ValidationError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    NotFound,

    #[error("product {0} does not exist")]
    UnknownProduct(ProductUuid),

    #[error("invalid cart lines")]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}
