//! Storage errors and column conversions shared by every store.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record conflicts with an existing record")]
    Conflict,

    #[error("record not found")]
    NotFound,

    #[error("related record not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::Conflict,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Convert an unsigned amount into a `BIGINT` bind value.
pub(crate) fn to_bigint(value: u64, column: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Convert a `BIGINT` column back into an unsigned amount.
pub(crate) fn from_bigint(value: i64, column: &str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn negative_bigint_is_rejected() {
        assert!(from_bigint(-1, "stock").is_err());
        assert_eq!(from_bigint(42, "stock").ok(), Some(42));
    }

    #[test]
    fn oversized_amount_is_rejected() {
        assert!(to_bigint(u64::MAX, "price").is_err());
        assert_eq!(to_bigint(100, "price").ok(), Some(100));
    }
}
