//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::bad_request().brief("A product with this code already exists")
        }
        ProductsServiceError::Validation(invalid) => {
            StatusError::bad_request().brief(format!("Invalid {invalid}"))
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Storage(source) => {
            error!(%source, "product storage failed");

            StatusError::internal_server_error()
        }
    }
}

/// Writes against an unknown product are rejected as bad requests.
pub(crate) fn into_write_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::bad_request().brief("Product not found"),
        other => into_status_error(other),
    }
}
