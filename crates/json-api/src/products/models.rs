//! Product payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::products::records::ProductRecord;

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPayload {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Unit price in minor currency units
    pub price: u64,
    pub stock: u64,
    pub category: String,
    pub code: String,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductPayload {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.uuid.into_uuid(),
            title: product.title,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            code: product.code,
            available: product.available,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
