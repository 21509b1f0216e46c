//! Receipts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::Db,
    domain::receipts::{
        data::NewReceipt,
        records::{ReceiptRecord, ReceiptUuid},
        store::ReceiptsStore,
    },
    storage::{StoreError, from_bigint, to_bigint},
};

const CREATE_RECEIPT_SQL: &str = include_str!("sql/create_receipt.sql");
const FIND_RECEIPT_SQL: &str = include_str!("sql/find_receipt.sql");

#[derive(Debug, Clone)]
pub struct PgReceiptsStore {
    db: Db,
}

impl PgReceiptsStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReceiptsStore for PgReceiptsStore {
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<ReceiptRecord, StoreError> {
        let created = query_as::<Postgres, ReceiptRecord>(CREATE_RECEIPT_SQL)
            .bind(receipt.uuid.into_uuid())
            .bind(&receipt.code)
            .bind(to_bigint(receipt.amount, "amount")?)
            .bind(&receipt.purchaser)
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn find_receipt(
        &self,
        receipt: ReceiptUuid,
    ) -> Result<Option<ReceiptRecord>, StoreError> {
        let receipt = query_as::<Postgres, ReceiptRecord>(FIND_RECEIPT_SQL)
            .bind(receipt.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(receipt)
    }
}

impl<'r> FromRow<'r, PgRow> for ReceiptRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReceiptUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            amount: from_bigint(row.try_get("amount")?, "amount")?,
            purchaser: row.try_get("purchaser")?,
            purchased_at: row.try_get::<SqlxTimestamp, _>("purchased_at")?.to_jiff(),
        })
    }
}
