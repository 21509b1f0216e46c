//! In-memory products store

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::products::{
        data::{NewProduct, ProductUpdate, StockDecrement},
        records::{ProductRecord, ProductUuid},
        store::ProductsStore,
    },
    storage::StoreError,
};

#[derive(Debug, Default)]
pub struct MemoryProductsStore {
    products: RwLock<FxHashMap<ProductUuid, ProductRecord>>,
}

impl MemoryProductsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn code_taken(
    products: &FxHashMap<ProductUuid, ProductRecord>,
    code: &str,
    except: Option<ProductUuid>,
) -> bool {
    products
        .values()
        .any(|product| product.code == code && Some(product.uuid) != except)
}

#[async_trait]
impl ProductsStore for MemoryProductsStore {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let mut products: Vec<ProductRecord> =
            self.products.read().await.values().cloned().collect();

        products.sort_by_key(|product| (product.created_at, product.uuid));

        Ok(products)
    }

    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, StoreError> {
        Ok(self.products.read().await.get(&product).cloned())
    }

    async fn find_product_by_code(&self, code: &str) -> Result<Option<ProductRecord>, StoreError> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .find(|product| product.code == code)
            .cloned())
    }

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, StoreError> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.uuid) || code_taken(&products, &product.code, None) {
            return Err(StoreError::Conflict);
        }

        let now = Timestamp::now();

        let record = ProductRecord {
            uuid: product.uuid,
            title: product.title,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            code: product.code,
            available: product.available,
            created_at: now,
            updated_at: now,
        };

        products.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StoreError> {
        let mut products = self.products.write().await;

        if let Some(code) = &update.code
            && code_taken(&products, code, Some(product))
        {
            return Err(StoreError::Conflict);
        }

        let Some(record) = products.get_mut(&product) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            record.title = title;
        }

        if let Some(description) = update.description {
            record.description = description;
        }

        if let Some(price) = update.price {
            record.price = price;
        }

        if let Some(stock) = update.stock {
            record.stock = stock;
        }

        if let Some(category) = update.category {
            record.category = category;
        }

        if let Some(code) = update.code {
            record.code = code;
        }

        if let Some(available) = update.available {
            record.available = available;
        }

        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(&product).is_some())
    }

    async fn decrement_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockDecrement, StoreError> {
        let mut products = self.products.write().await;

        let Some(record) = products.get_mut(&product) else {
            return Ok(StockDecrement::Rejected);
        };

        let Some(remaining) = record.stock.checked_sub(u64::from(quantity)) else {
            return Ok(StockDecrement::Rejected);
        };

        record.stock = remaining;
        record.updated_at = Timestamp::now();

        Ok(StockDecrement::Applied(record.clone()))
    }
}
