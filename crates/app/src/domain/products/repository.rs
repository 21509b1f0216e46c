//! Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate, StockDecrement},
        records::{ProductRecord, ProductUuid},
        store::ProductsStore,
    },
    storage::{StoreError, from_bigint, to_bigint},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const FIND_PRODUCT_SQL: &str = include_str!("sql/find_product.sql");
const FIND_PRODUCT_BY_CODE_SQL: &str = include_str!("sql/find_product_by_code.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone)]
pub struct PgProductsStore {
    db: Db,
}

impl PgProductsStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsStore for PgProductsStore {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        let products = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(products)
    }

    async fn find_product(
        &self,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, StoreError> {
        let product = query_as::<Postgres, ProductRecord>(FIND_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(product)
    }

    async fn find_product_by_code(&self, code: &str) -> Result<Option<ProductRecord>, StoreError> {
        let product = query_as::<Postgres, ProductRecord>(FIND_PRODUCT_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, StoreError> {
        let created = query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.title)
            .bind(&product.description)
            .bind(to_bigint(product.price, "price")?)
            .bind(to_bigint(product.stock, "stock")?)
            .bind(&product.category)
            .bind(&product.code)
            .bind(product.available)
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Option<ProductRecord>, StoreError> {
        let price = update
            .price
            .map(|price| to_bigint(price, "price"))
            .transpose()?;

        let stock = update
            .stock
            .map(|stock| to_bigint(stock, "stock"))
            .transpose()?;

        let updated = query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.title)
            .bind(update.description)
            .bind(price)
            .bind(stock)
            .bind(update.category)
            .bind(update.code)
            .bind(update.available)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn decrement_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<StockDecrement, StoreError> {
        let decremented = query_as::<Postgres, ProductRecord>(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(i64::from(quantity))
            .fetch_optional(self.db.pool())
            .await?;

        Ok(decremented.map_or(StockDecrement::Rejected, StockDecrement::Applied))
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: from_bigint(row.try_get("price")?, "price")?,
            stock: from_bigint(row.try_get("stock")?, "stock")?,
            category: row.try_get("category")?,
            code: row.try_get("code")?,
            available: row.try_get("available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
