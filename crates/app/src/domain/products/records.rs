//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    /// Unit price in minor currency units.
    pub price: u64,
    pub stock: u64,
    pub category: String,
    /// Unique merchant-facing product code.
    pub code: String,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether the current stock covers `quantity` units.
    #[must_use]
    pub fn can_supply(&self, quantity: u32) -> bool {
        self.stock >= u64::from(quantity)
    }
}
