//! Cart payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::carts::records::{CartLine, CartRecord};

/// A product and how many of it are wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLinePayload {
    pub product_id: Uuid,
    pub quantity: u32,
}

impl From<CartLine> for CartLinePayload {
    fn from(line: CartLine) -> Self {
        Self {
            product_id: line.product_uuid.into_uuid(),
            quantity: line.quantity,
        }
    }
}

impl From<CartLinePayload> for CartLine {
    fn from(line: CartLinePayload) -> Self {
        Self {
            product_uuid: line.product_id.into(),
            quantity: line.quantity,
        }
    }
}

/// Cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartPayload {
    pub id: Uuid,
    pub products: Vec<CartLinePayload>,
    pub updated_at: String,
}

impl From<CartRecord> for CartPayload {
    fn from(cart: CartRecord) -> Self {
        Self {
            id: cart.uuid.into_uuid(),
            products: cart.lines.into_iter().map(CartLinePayload::from).collect(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}
