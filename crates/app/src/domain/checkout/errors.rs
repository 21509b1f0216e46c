//! Checkout errors.

use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is missing or has no lines")]
    EmptyOrMissingCart,

    #[error("order total exceeds the representable amount")]
    AmountOverflow,

    #[error("storage error")]
    Storage(#[from] StoreError),
}
