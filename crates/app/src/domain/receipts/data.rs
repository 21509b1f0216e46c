//! Receipt Data

use uuid::Uuid;

use crate::domain::receipts::records::ReceiptUuid;

/// New Receipt Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReceipt {
    pub uuid: ReceiptUuid,
    pub code: String,
    pub amount: u64,
    pub purchaser: String,
}

impl NewReceipt {
    /// A receipt for `amount`, with a fresh random code.
    #[must_use]
    pub fn issue(amount: u64, purchaser: &str) -> Self {
        Self {
            uuid: ReceiptUuid::new(),
            code: Uuid::new_v4().simple().to_string(),
            amount,
            purchaser: purchaser.to_string(),
        }
    }
}
