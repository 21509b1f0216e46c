//! Checkout outcomes.

use crate::domain::{products::records::ProductUuid, receipts::records::ReceiptRecord};

/// Result of purchasing a cart.
///
/// A receipt is present when at least one line was fulfilled. Every product
/// that could not be supplied is listed in cart order, and those lines are
/// what remains in the cart afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Receipt for the fulfilled lines, if any were.
    pub receipt: Option<ReceiptRecord>,

    /// Products left in the cart, in cart order.
    pub failed_products: Vec<ProductUuid>,
}

/// Coarse classification of a [`CheckoutOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    /// Every line was fulfilled.
    Purchased,

    /// Some lines were fulfilled.
    Partial,

    /// Nothing could be fulfilled.
    Unfulfilled,
}

impl CheckoutKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchased => "purchased",
            Self::Partial => "partial",
            Self::Unfulfilled => "unfulfilled",
        }
    }
}

impl CheckoutOutcome {
    #[must_use]
    pub fn kind(&self) -> CheckoutKind {
        match (&self.receipt, self.failed_products.is_empty()) {
            (Some(_), true) => CheckoutKind::Purchased,
            (Some(_), false) => CheckoutKind::Partial,
            (None, _) => CheckoutKind::Unfulfilled,
        }
    }
}
