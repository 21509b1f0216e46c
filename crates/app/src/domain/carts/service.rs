//! Carts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use futures::future::try_join_all;
use mockall::automock;

use crate::domain::{
    carts::{
        data::validate_lines,
        errors::CartsServiceError,
        records::{CartLine, CartRecord, CartUuid},
        store::CartsStore,
    },
    products::store::ProductsStore,
};

#[derive(Clone)]
pub struct CartsManager {
    carts: Arc<dyn CartsStore>,
    products: Arc<dyn ProductsStore>,
}

impl fmt::Debug for CartsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartsManager").finish_non_exhaustive()
    }
}

impl CartsManager {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsStore>, products: Arc<dyn ProductsStore>) -> Self {
        Self { carts, products }
    }

    async fn ensure_products_exist(&self, lines: &[CartLine]) -> Result<(), CartsServiceError> {
        let found = try_join_all(
            lines
                .iter()
                .map(|line| self.products.find_product(line.product_uuid)),
        )
        .await?;

        match lines.iter().zip(found).find(|(_, product)| product.is_none()) {
            Some((line, _)) => Err(CartsServiceError::UnknownProduct(line.product_uuid)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CartsService for CartsManager {
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        self.carts
            .find_cart(cart)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<CartRecord, CartsServiceError> {
        validate_lines(&lines)?;

        self.ensure_products_exist(&lines).await?;

        self.carts
            .replace_lines(cart, lines)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        self.carts
            .clear_cart(cart)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart.
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Replace a cart's lines. Every referenced product must exist.
    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove every line from a cart.
    async fn clear_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;
}
