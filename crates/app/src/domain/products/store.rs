//! Products Store

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::products::{
        data::{NewProduct, ProductUpdate, StockDecrement},
        records::{ProductRecord, ProductUuid},
    },
    storage::StoreError,
};

/// Inventory store: persists products and their stock levels.
#[automock]
#[async_trait]
pub trait ProductsStore: Send + Sync {
    /// List every product, oldest first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError>;

    /// Look a product up by UUID.
    async fn find_product(&self, product: ProductUuid)
    -> Result<Option<ProductRecord>, StoreError>;

    /// Look a product up by its unique code.
    async fn find_product_by_code(&self, code: &str) -> Result<Option<ProductRecord>, StoreError>;

    /// Persist a new product. Fails with [`StoreError::Conflict`] on a duplicate code.
    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, StoreError>;

    /// Apply a partial update, returning `None` when the product does not exist.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StoreError>;

    /// Delete a product. Returns `false` when the product does not exist.
    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError>;

    /// Reduce stock by `quantity` only if the current stock covers it.
    ///
    /// The check and the update happen atomically: two concurrent decrements
    /// can never take stock below zero.
    async fn decrement_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockDecrement, StoreError>;
}
