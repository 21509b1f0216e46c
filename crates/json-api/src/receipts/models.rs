//! Receipt payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::receipts::records::ReceiptRecord;

/// Receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptPayload {
    pub id: Uuid,
    pub code: String,
    /// Total charged in minor currency units
    pub amount: u64,
    pub purchaser: String,
    pub purchased_at: String,
}

impl From<ReceiptRecord> for ReceiptPayload {
    fn from(receipt: ReceiptRecord) -> Self {
        Self {
            id: receipt.uuid.into_uuid(),
            code: receipt.code,
            amount: receipt.amount,
            purchaser: receipt.purchaser,
            purchased_at: receipt.purchased_at.to_string(),
        }
    }
}
