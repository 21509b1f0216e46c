//! Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgConnection, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartLine, CartRecord, CartUuid},
            store::CartsStore,
        },
        products::records::ProductUuid,
    },
    storage::StoreError,
};

const FIND_CART_SQL: &str = include_str!("sql/find_cart.sql");
const FIND_CART_LINES_SQL: &str = include_str!("sql/find_cart_lines.sql");
const CREATE_CART_SQL: &str = include_str!("sql/create_cart.sql");
const TOUCH_CART_SQL: &str = include_str!("sql/touch_cart.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("sql/delete_cart_lines.sql");
const CREATE_CART_LINE_SQL: &str = include_str!("sql/create_cart_line.sql");
const DELETE_CART_SQL: &str = include_str!("sql/delete_cart.sql");

#[derive(Debug, Clone)]
pub struct PgCartsStore {
    db: Db,
}

impl PgCartsStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn write_lines(
        conn: &mut PgConnection,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<Option<CartRecord>, StoreError> {
        let Some(mut record) = query_as::<Postgres, CartRecord>(TOUCH_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        query(DELETE_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .execute(&mut *conn)
            .await?;

        for (position, line) in lines.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
                index: "position".to_string(),
                source: Box::new(e),
            })?;

            query(CREATE_CART_LINE_SQL)
                .bind(cart.into_uuid())
                .bind(position)
                .bind(line.product_uuid.into_uuid())
                .bind(i64::from(line.quantity))
                .execute(&mut *conn)
                .await?;
        }

        record.lines = lines;

        Ok(Some(record))
    }
}

#[async_trait]
impl CartsStore for PgCartsStore {
    async fn create_cart(&self, cart: CartUuid) -> Result<CartRecord, StoreError> {
        let created = query_as::<Postgres, CartRecord>(CREATE_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn find_cart(&self, cart: CartUuid) -> Result<Option<CartRecord>, StoreError> {
        let mut tx = self.db.begin().await?;

        let Some(mut record) = query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let lines = query_as::<Postgres, CartLine>(FIND_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        record.lines.extend(lines);

        Ok(Some(record))
    }

    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<Option<CartRecord>, StoreError> {
        let mut tx = self.db.begin().await?;

        let record = Self::write_lines(&mut *tx, cart, lines).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<Option<CartRecord>, StoreError> {
        self.replace_lines(cart, Vec::new()).await
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<bool, StoreError> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;

        Ok(Self {
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
        })
    }
}
