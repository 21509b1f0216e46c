//! In-memory carts store

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::{
    domain::carts::{
        records::{CartLine, CartRecord, CartUuid},
        store::CartsStore,
    },
    storage::StoreError,
};

#[derive(Debug, Default)]
pub struct MemoryCartsStore {
    carts: RwLock<FxHashMap<CartUuid, CartRecord>>,
}

impl MemoryCartsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of carts currently held.
    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl CartsStore for MemoryCartsStore {
    async fn create_cart(&self, cart: CartUuid) -> Result<CartRecord, StoreError> {
        let mut carts = self.carts.write().await;

        if carts.contains_key(&cart) {
            return Err(StoreError::Conflict);
        }

        let now = Timestamp::now();

        let record = CartRecord {
            uuid: cart,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        carts.insert(cart, record.clone());

        Ok(record)
    }

    async fn find_cart(&self, cart: CartUuid) -> Result<Option<CartRecord>, StoreError> {
        Ok(self.carts.read().await.get(&cart).cloned())
    }

    async fn replace_lines(
        &self,
        cart: CartUuid,
        lines: Vec<CartLine>,
    ) -> Result<Option<CartRecord>, StoreError> {
        let mut carts = self.carts.write().await;

        let Some(record) = carts.get_mut(&cart) else {
            return Ok(None);
        };

        record.lines = lines;
        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<Option<CartRecord>, StoreError> {
        self.replace_lines(cart, Vec::new()).await
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<bool, StoreError> {
        Ok(self.carts.write().await.remove(&cart).is_some())
    }
}
