//! Receipt Records

use jiff::Timestamp;

use crate::{access::Role, domain::accounts::records::AccountRecord, uuids::TypedUuid};

/// Receipt UUID
pub type ReceiptUuid = TypedUuid<ReceiptRecord>;

/// Receipt Record. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRecord {
    pub uuid: ReceiptUuid,
    /// Unique human-facing receipt code.
    pub code: String,
    /// Total charged, in minor currency units.
    pub amount: u64,
    /// Email of the purchasing account.
    pub purchaser: String,
    pub purchased_at: Timestamp,
}

impl ReceiptRecord {
    /// Receipts are visible to their purchaser and to administrators.
    #[must_use]
    pub fn visible_to(&self, account: &AccountRecord) -> bool {
        account.role == Role::Admin || account.email == self.purchaser
    }
}
