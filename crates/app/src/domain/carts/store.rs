//! Carts Store

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::carts::records::{CartLine, CartRecord, CartUuid},
    storage::StoreError,
};

/// Cart store: persists each cart's ordered line list.
#[automock]
#[async_trait]
pub trait CartsStore: Send + Sync {
    /// Create an empty cart.
    async fn create_cart(&self, cart: CartUuid) -> Result<CartRecord, StoreError>;

    /// Look a cart up, lines in their stored order.
    async fn find_cart(&self, cart: CartUuid) -> Result<Option<CartRecord>, StoreError>;

    /// Replace the whole line list. Returns `None` when the cart does not exist.
    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<Option<CartRecord>, StoreError>;

    /// Remove every line. Returns `None` when the cart does not exist.
    async fn clear_cart(&self, cart: CartUuid) -> Result<Option<CartRecord>, StoreError>;

    /// Delete a cart outright. Returns `false` when the cart does not exist.
    async fn delete_cart(&self, cart: CartUuid) -> Result<bool, StoreError>;
}
