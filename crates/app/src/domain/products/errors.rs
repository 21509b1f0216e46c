//! Products service errors.

use thiserror::Error;

use crate::{storage::StoreError, validation::ValidationError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("a product with this code already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("invalid product data")]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_means_duplicate_code() {
        assert!(matches!(
            ProductsServiceError::from(StoreError::Conflict),
            ProductsServiceError::AlreadyExists
        ));
    }
}
