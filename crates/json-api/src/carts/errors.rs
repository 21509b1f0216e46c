//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::{carts::CartsServiceError, checkout::CheckoutError};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::UnknownProduct(product) => {
            StatusError::bad_request().brief(format!("Product {product} does not exist"))
        }
        CartsServiceError::Validation(invalid) => {
            StatusError::bad_request().brief(format!("Invalid {invalid}"))
        }
        CartsServiceError::Storage(source) => {
            error!(%source, "cart storage failed");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn into_checkout_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyOrMissingCart => {
            StatusError::bad_request().brief("The cart is empty or does not exist")
        }
        CheckoutError::AmountOverflow => {
            StatusError::bad_request().brief("The order total is too large")
        }
        CheckoutError::Storage(source) => {
            error!(%source, "checkout failed");

            StatusError::internal_server_error()
        }
    }
}
