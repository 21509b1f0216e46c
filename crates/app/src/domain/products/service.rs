//! Products service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    errors::ProductsServiceError,
    records::{ProductRecord, ProductUuid},
    store::ProductsStore,
};

/// Catalog maintenance on top of the inventory store.
#[derive(Clone)]
pub struct ProductsManager {
    products: Arc<dyn ProductsStore>,
}

impl fmt::Debug for ProductsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductsManager").finish_non_exhaustive()
    }
}

impl ProductsManager {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsStore>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductsService for ProductsManager {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        Ok(self.products.list_products().await?)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.products
            .find_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        if self
            .products
            .find_product_by_code(&product.code)
            .await?
            .is_some()
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let created = self.products.create_product(product).await?;

        info!(product = %created.uuid, code = %created.code, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate()?;

        if let Some(code) = &update.code
            && let Some(existing) = self.products.find_product_by_code(code).await?
            && existing.uuid != product
        {
            return Err(ProductsServiceError::AlreadyExists);
        }

        self.products
            .update_product(product, update)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        if !self.products.delete_product(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        info!(%product, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product with a unique code.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update to a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, fixtures::new_product};

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .products
            .create_product(new_product("MUG-1", 999, 4))
            .await?;

        assert_eq!(product.code, "MUG-1");
        assert_eq!(product.price, 999);
        assert_eq!(product.stock, 4);
        assert!(product.available);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_returns_created_products() -> TestResult {
        let ctx = TestContext::new();

        let a = ctx
            .products
            .create_product(new_product("A-1", 100, 1))
            .await?;
        let b = ctx
            .products
            .create_product(new_product("B-1", 200, 1))
            .await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert!(uuids.contains(&a.uuid), "product A should be in the list");
        assert!(uuids.contains(&b.uuid), "product B should be in the list");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new();

        ctx.products
            .create_product(new_product("MUG-1", 100, 1))
            .await?;

        let result = ctx
            .products
            .create_product(new_product("MUG-1", 200, 1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_to_taken_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new();

        ctx.products
            .create_product(new_product("MUG-1", 100, 1))
            .await?;
        let other = ctx
            .products
            .create_product(new_product("MUG-2", 100, 1))
            .await?;

        let result = ctx
            .products
            .update_product(
                other.uuid,
                ProductUpdate {
                    code: Some("MUG-1".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reflects_new_price() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .products
            .create_product(new_product("MUG-1", 500, 1))
            .await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    price: Some(750),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.uuid, product.uuid);
        assert_eq!(updated.price, 750);
        assert_eq!(updated.title, product.title);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .update_product(ProductUuid::new(), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .products
            .create_product(new_product("MUG-1", 300, 1))
            .await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_title_is_a_validation_error() {
        let ctx = TestContext::new();

        let mut product = new_product("MUG-1", 300, 1);
        product.title = String::new();

        let result = ctx.products.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }
}
