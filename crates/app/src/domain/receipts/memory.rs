//! In-memory receipts store

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::receipts::{
        data::NewReceipt,
        records::{ReceiptRecord, ReceiptUuid},
        store::ReceiptsStore,
    },
    storage::StoreError,
};

#[derive(Debug, Default)]
pub struct MemoryReceiptsStore {
    receipts: RwLock<FxHashMap<ReceiptUuid, ReceiptRecord>>,
}

impl MemoryReceiptsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every receipt held, in no particular order.
    pub async fn all(&self) -> Vec<ReceiptRecord> {
        self.receipts.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl ReceiptsStore for MemoryReceiptsStore {
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<ReceiptRecord, StoreError> {
        let mut receipts = self.receipts.write().await;

        if receipts.contains_key(&receipt.uuid)
            || receipts.values().any(|existing| existing.code == receipt.code)
        {
            return Err(StoreError::Conflict);
        }

        let record = ReceiptRecord {
            uuid: receipt.uuid,
            code: receipt.code,
            amount: receipt.amount,
            purchaser: receipt.purchaser,
            purchased_at: Timestamp::now(),
        };

        receipts.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn find_receipt(
        &self,
        receipt: ReceiptUuid,
    ) -> Result<Option<ReceiptRecord>, StoreError> {
        Ok(self.receipts.read().await.get(&receipt).cloned())
    }
}
