//! Receipts Store

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::receipts::{
        data::NewReceipt,
        records::{ReceiptRecord, ReceiptUuid},
    },
    storage::StoreError,
};

/// Receipt store: write-once purchase records.
#[automock]
#[async_trait]
pub trait ReceiptsStore: Send + Sync {
    /// Persist a receipt. Fails with [`StoreError::Conflict`] on a duplicate code.
    async fn create_receipt(&self, receipt: NewReceipt) -> Result<ReceiptRecord, StoreError>;

    /// Look a receipt up by UUID.
    async fn find_receipt(&self, receipt: ReceiptUuid)
    -> Result<Option<ReceiptRecord>, StoreError>;
}
