//! Receipts service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;

use crate::domain::receipts::{
    errors::ReceiptsServiceError,
    records::{ReceiptRecord, ReceiptUuid},
    store::ReceiptsStore,
};

#[derive(Clone)]
pub struct ReceiptsManager {
    receipts: Arc<dyn ReceiptsStore>,
}

impl fmt::Debug for ReceiptsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptsManager").finish_non_exhaustive()
    }
}

impl ReceiptsManager {
    #[must_use]
    pub fn new(receipts: Arc<dyn ReceiptsStore>) -> Self {
        Self { receipts }
    }
}

#[async_trait]
impl ReceiptsService for ReceiptsManager {
    async fn get_receipt(
        &self,
        receipt: ReceiptUuid,
    ) -> Result<ReceiptRecord, ReceiptsServiceError> {
        self.receipts
            .find_receipt(receipt)
            .await?
            .ok_or(ReceiptsServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait ReceiptsService: Send + Sync {
    /// Retrieve a single receipt.
    async fn get_receipt(&self, receipt: ReceiptUuid)
    -> Result<ReceiptRecord, ReceiptsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::receipts::data::NewReceipt, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn get_receipt_returns_stored_receipt() -> TestResult {
        let ctx = TestContext::new();

        let created = ctx
            .receipts_store
            .create_receipt(NewReceipt::issue(250, "ana@example.com"))
            .await?;

        let found = ctx.receipts.get_receipt(created.uuid).await?;

        assert_eq!(found, created);

        Ok(())
    }

    #[tokio::test]
    async fn get_receipt_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.receipts.get_receipt(ReceiptUuid::new()).await;

        assert!(
            matches!(result, Err(ReceiptsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
