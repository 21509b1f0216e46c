//! Checkout engine.
//!
//! Reconciles a cart against live inventory. Lines the inventory can cover
//! are bought, the rest stay in the cart. Each stock decrement is atomic on
//! its own; there is no rollback across lines.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::{error, info, warn};

use crate::{
    domain::{
        carts::{
            records::{CartLine, CartRecord, CartUuid},
            store::CartsStore,
        },
        checkout::{errors::CheckoutError, outcome::CheckoutOutcome},
        products::{data::StockDecrement, records::ProductUuid, store::ProductsStore},
        receipts::{data::NewReceipt, store::ReceiptsStore},
    },
    validation::MAX_AMOUNT,
};

/// A line the inventory could cover when it was read, with the price seen then.
#[derive(Debug, Clone, Copy)]
struct PricedLine {
    line: CartLine,
    price: u64,
}

/// Sum of price times quantity, or `None` when it exceeds what a receipt can record.
fn total_amount(lines: &[PricedLine]) -> Option<u64> {
    lines
        .iter()
        .try_fold(0_u64, |total, priced| {
            priced
                .price
                .checked_mul(u64::from(priced.line.quantity))
                .and_then(|subtotal| total.checked_add(subtotal))
        })
        .filter(|total| *total <= MAX_AMOUNT)
}

fn nothing_fulfilled(cart: &CartRecord) -> CheckoutOutcome {
    CheckoutOutcome {
        receipt: None,
        failed_products: cart.lines.iter().map(|line| line.product_uuid).collect(),
    }
}

/// Purchases carts against the product and receipt stores.
#[derive(Clone)]
pub struct CheckoutEngine {
    carts: Arc<dyn CartsStore>,
    products: Arc<dyn ProductsStore>,
    receipts: Arc<dyn ReceiptsStore>,
}

impl fmt::Debug for CheckoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutEngine").finish_non_exhaustive()
    }
}

impl CheckoutEngine {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsStore>,
        products: Arc<dyn ProductsStore>,
        receipts: Arc<dyn ReceiptsStore>,
    ) -> Self {
        Self {
            carts,
            products,
            receipts,
        }
    }

    /// Split lines into those the current stock covers and the product ids of the rest.
    async fn partition(
        &self,
        cart: &CartRecord,
    ) -> Result<(Vec<PricedLine>, FxHashSet<ProductUuid>), CheckoutError> {
        let products = try_join_all(
            cart.lines
                .iter()
                .map(|line| self.products.find_product(line.product_uuid)),
        )
        .await?;

        let mut fulfillable = Vec::with_capacity(cart.lines.len());
        let mut unfulfillable = FxHashSet::default();

        for (line, product) in cart.lines.iter().zip(products) {
            match product {
                Some(product) if product.can_supply(line.quantity) => fulfillable.push(PricedLine {
                    line: *line,
                    price: product.price,
                }),
                _ => {
                    unfulfillable.insert(line.product_uuid);
                }
            }
        }

        Ok((fulfillable, unfulfillable))
    }

    /// Attempt every decrement, returning the lines that were applied.
    ///
    /// Lines whose decrement is rejected or fails are added to `unfulfillable`.
    async fn decrement_all(
        &self,
        cart: CartUuid,
        fulfillable: Vec<PricedLine>,
        unfulfillable: &mut FxHashSet<ProductUuid>,
    ) -> Vec<PricedLine> {
        let results = join_all(fulfillable.iter().map(|priced| {
            self.products
                .decrement_stock(priced.line.product_uuid, priced.line.quantity)
        }))
        .await;

        let mut applied = Vec::with_capacity(fulfillable.len());

        for (priced, result) in fulfillable.into_iter().zip(results) {
            let product = priced.line.product_uuid;

            match result {
                Ok(StockDecrement::Applied(_)) => applied.push(priced),
                Ok(StockDecrement::Rejected) => {
                    info!(%cart, %product, "stock ran out before decrement");

                    unfulfillable.insert(product);
                }
                Err(error) => {
                    error!(%cart, %product, %error, "stock decrement failed");

                    unfulfillable.insert(product);
                }
            }
        }

        applied
    }
}

#[async_trait]
impl CheckoutService for CheckoutEngine {
    async fn purchase(
        &self,
        cart: CartUuid,
        purchaser: &str,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let record = match self.carts.find_cart(cart).await? {
            Some(record) if !record.is_empty() => record,
            _ => return Err(CheckoutError::EmptyOrMissingCart),
        };

        let (fulfillable, mut unfulfillable) = self.partition(&record).await?;

        if fulfillable.is_empty() {
            info!(%cart, "nothing in cart can be fulfilled");

            return Ok(nothing_fulfilled(&record));
        }

        if total_amount(&fulfillable).is_none() {
            return Err(CheckoutError::AmountOverflow);
        }

        let applied = self
            .decrement_all(cart, fulfillable, &mut unfulfillable)
            .await;

        if applied.is_empty() {
            info!(%cart, "every decrement was rejected");

            return Ok(nothing_fulfilled(&record));
        }

        let amount = total_amount(&applied).ok_or(CheckoutError::AmountOverflow)?;

        let receipt = self
            .receipts
            .create_receipt(NewReceipt::issue(amount, purchaser))
            .await
            .inspect_err(|error| {
                error!(%cart, %error, "stock was taken but the receipt could not be written");
            })?;

        let remaining: Vec<CartLine> = record
            .lines
            .iter()
            .filter(|line| unfulfillable.contains(&line.product_uuid))
            .copied()
            .collect();

        let failed_products = remaining.iter().map(|line| line.product_uuid).collect();

        if self.carts.replace_lines(cart, remaining).await?.is_none() {
            warn!(%cart, "cart disappeared during checkout");
        }

        info!(
            %cart,
            receipt = %receipt.uuid,
            amount = receipt.amount,
            failed = unfulfillable.len(),
            "cart purchased"
        );

        Ok(CheckoutOutcome {
            receipt: Some(receipt),
            failed_products,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Purchase whatever the inventory can currently supply from a cart.
    async fn purchase(
        &self,
        cart: CartUuid,
        purchaser: &str,
    ) -> Result<CheckoutOutcome, CheckoutError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            checkout::outcome::CheckoutKind,
            products::{records::ProductRecord, store::MockProductsStore},
            receipts::memory::MemoryReceiptsStore,
        },
        storage::StoreError,
        test::{TestContext, fixtures::new_product},
    };

    use super::*;

    const PURCHASER: &str = "ana@example.com";

    async fn cart_with(ctx: &TestContext, lines: &[(ProductUuid, u32)]) -> TestResult<CartUuid> {
        let cart = ctx.carts_store.create_cart(CartUuid::new()).await?;

        let lines = lines
            .iter()
            .map(|&(product_uuid, quantity)| CartLine {
                product_uuid,
                quantity,
            })
            .collect();

        ctx.carts_store.replace_lines(cart.uuid, lines).await?;

        Ok(cart.uuid)
    }

    async fn stock_of(ctx: &TestContext, product: ProductUuid) -> TestResult<Option<u64>> {
        Ok(ctx
            .products_store
            .find_product(product)
            .await?
            .map(|p| p.stock))
    }

    #[tokio::test]
    async fn partially_fulfillable_cart_buys_what_it_can() -> TestResult {
        let ctx = TestContext::new();

        let a = ctx
            .products_store
            .create_product(new_product("A", 100, 5))
            .await?;
        let b = ctx
            .products_store
            .create_product(new_product("B", 50, 1))
            .await?;

        let cart = cart_with(&ctx, &[(a.uuid, 2), (b.uuid, 3)]).await?;

        let outcome = ctx.checkout.purchase(cart, PURCHASER).await?;

        let receipt = outcome.receipt.clone().ok_or("expected a receipt")?;

        assert_eq!(receipt.amount, 200);
        assert_eq!(receipt.purchaser, PURCHASER);
        assert_eq!(outcome.failed_products, vec![b.uuid]);
        assert_eq!(outcome.kind(), CheckoutKind::Partial);
        assert_eq!(stock_of(&ctx, a.uuid).await?, Some(3));
        assert_eq!(stock_of(&ctx, b.uuid).await?, Some(1));

        let remaining = ctx.carts_store.find_cart(cart).await?.ok_or("cart gone")?;

        assert_eq!(
            remaining.lines,
            vec![CartLine {
                product_uuid: b.uuid,
                quantity: 3
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn fully_fulfillable_cart_is_emptied() -> TestResult {
        let ctx = TestContext::new();

        let a = ctx
            .products_store
            .create_product(new_product("A", 100, 5))
            .await?;
        let b = ctx
            .products_store
            .create_product(new_product("B", 75, 4))
            .await?;

        let cart = cart_with(&ctx, &[(a.uuid, 1), (b.uuid, 4)]).await?;

        let outcome = ctx.checkout.purchase(cart, PURCHASER).await?;

        assert_eq!(outcome.receipt.map(|r| r.amount), Some(400));
        assert!(outcome.failed_products.is_empty());
        assert_eq!(stock_of(&ctx, b.uuid).await?, Some(0));
        assert_eq!(
            ctx.carts_store.find_cart(cart).await?.map(|c| c.lines.len()),
            Some(0)
        );

        Ok(())
    }

    #[tokio::test]
    async fn unfulfillable_cart_changes_nothing() -> TestResult {
        let ctx = TestContext::new();

        let a = ctx
            .products_store
            .create_product(new_product("A", 100, 1))
            .await?;
        let missing = ProductUuid::new();

        let cart = cart_with(&ctx, &[(a.uuid, 2), (missing, 1)]).await?;
        let before = ctx.carts_store.find_cart(cart).await?;

        let outcome = ctx.checkout.purchase(cart, PURCHASER).await?;

        assert!(outcome.receipt.is_none());
        assert_eq!(outcome.failed_products, vec![a.uuid, missing]);
        assert_eq!(outcome.kind(), CheckoutKind::Unfulfilled);
        assert_eq!(stock_of(&ctx, a.uuid).await?, Some(1));
        assert_eq!(ctx.carts_store.find_cart(cart).await?, before);
        assert!(ctx.receipts_store.all().await.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn missing_or_empty_cart_is_rejected() -> TestResult {
        let ctx = TestContext::new();

        let empty = cart_with(&ctx, &[]).await?;

        let missing = ctx.checkout.purchase(CartUuid::new(), PURCHASER).await;
        let empty = ctx.checkout.purchase(empty, PURCHASER).await;

        assert!(
            matches!(missing, Err(CheckoutError::EmptyOrMissingCart)),
            "expected EmptyOrMissingCart, got {missing:?}"
        );
        assert!(
            matches!(empty, Err(CheckoutError::EmptyOrMissingCart)),
            "expected EmptyOrMissingCart, got {empty:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_never_oversell() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .products_store
            .create_product(new_product("A", 100, 5))
            .await?;

        let first = cart_with(&ctx, &[(product.uuid, 3)]).await?;
        let second = cart_with(&ctx, &[(product.uuid, 3)]).await?;

        let (a, b) = tokio::join!(
            ctx.checkout.purchase(first, PURCHASER),
            ctx.checkout.purchase(second, "ben@example.com")
        );

        let outcomes = [a?, b?];

        let receipts = outcomes.iter().filter(|o| o.receipt.is_some()).count();
        let losers: Vec<_> = outcomes.iter().filter(|o| o.receipt.is_none()).collect();

        assert_eq!(receipts, 1, "exactly one checkout should succeed");
        assert_eq!(
            losers.first().map(|o| o.failed_products.clone()),
            Some(vec![product.uuid])
        );
        assert_eq!(stock_of(&ctx, product.uuid).await?, Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn overflowing_total_is_rejected_before_any_decrement() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .products_store
            .create_product(new_product("A", u64::MAX, 5))
            .await?;

        let cart = cart_with(&ctx, &[(product.uuid, 2)]).await?;

        let result = ctx.checkout.purchase(cart, PURCHASER).await;

        assert!(
            matches!(result, Err(CheckoutError::AmountOverflow)),
            "expected AmountOverflow, got {result:?}"
        );
        assert_eq!(stock_of(&ctx, product.uuid).await?, Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn total_beyond_receipt_range_is_rejected_before_any_decrement() -> TestResult {
        let ctx = TestContext::new();

        let product = ctx
            .products_store
            .create_product(new_product("A", MAX_AMOUNT, 5))
            .await?;

        let cart = cart_with(&ctx, &[(product.uuid, 2)]).await?;

        let result = ctx.checkout.purchase(cart, PURCHASER).await;

        assert!(
            matches!(result, Err(CheckoutError::AmountOverflow)),
            "expected AmountOverflow, got {result:?}"
        );
        assert_eq!(stock_of(&ctx, product.uuid).await?, Some(5));
        assert!(ctx.receipts_store.all().await.is_empty());
        assert_eq!(
            ctx.carts_store.find_cart(cart).await?.map(|c| c.lines.len()),
            Some(1)
        );

        Ok(())
    }

    fn product_record(stock: u64, price: u64) -> ProductRecord {
        let new = new_product("MOCK", price, stock);

        ProductRecord {
            uuid: new.uuid,
            title: new.title,
            description: new.description,
            price: new.price,
            stock: new.stock,
            category: new.category,
            code: new.code,
            available: new.available,
            created_at: jiff::Timestamp::now(),
            updated_at: jiff::Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn late_rejected_decrement_moves_line_to_failed() -> TestResult {
        let ctx = TestContext::new();
        let product = product_record(5, 100);
        let uuid = product.uuid;

        let mut products = MockProductsStore::new();
        products
            .expect_find_product()
            .returning(move |_| Ok(Some(product.clone())));
        products
            .expect_decrement_stock()
            .returning(|_, _| Ok(StockDecrement::Rejected));

        let receipts = Arc::new(MemoryReceiptsStore::new());
        let engine = CheckoutEngine::new(
            ctx.carts_store.clone(),
            Arc::new(products),
            receipts.clone(),
        );

        let cart = cart_with(&ctx, &[(uuid, 2)]).await?;

        let outcome = engine.purchase(cart, PURCHASER).await?;

        assert!(outcome.receipt.is_none());
        assert_eq!(outcome.failed_products, vec![uuid]);
        assert!(receipts.all().await.is_empty());
        assert_eq!(
            ctx.carts_store.find_cart(cart).await?.map(|c| c.lines.len()),
            Some(1)
        );

        Ok(())
    }

    #[tokio::test]
    async fn failing_decrement_only_fails_its_own_line() -> TestResult {
        let ctx = TestContext::new();
        let healthy = product_record(5, 100);
        let broken = product_record(5, 40);
        let (healthy_uuid, broken_uuid) = (healthy.uuid, broken.uuid);

        let mut products = MockProductsStore::new();
        products.expect_find_product().returning(move |uuid| {
            Ok(Some(if uuid == healthy_uuid {
                healthy.clone()
            } else {
                broken.clone()
            }))
        });
        products
            .expect_decrement_stock()
            .returning(move |uuid, quantity| {
                if uuid == broken_uuid {
                    return Err(StoreError::InvalidData);
                }

                let mut applied = product_record(5 - u64::from(quantity), 100);
                applied.uuid = uuid;

                Ok(StockDecrement::Applied(applied))
            });

        let receipts = Arc::new(MemoryReceiptsStore::new());
        let engine = CheckoutEngine::new(
            ctx.carts_store.clone(),
            Arc::new(products),
            receipts.clone(),
        );

        let cart = cart_with(&ctx, &[(broken_uuid, 1), (healthy_uuid, 2)]).await?;

        let outcome = engine.purchase(cart, PURCHASER).await?;

        assert_eq!(outcome.receipt.map(|r| r.amount), Some(200));
        assert_eq!(outcome.failed_products, vec![broken_uuid]);
        assert_eq!(receipts.all().await.len(), 1);

        Ok(())
    }

    #[test]
    fn total_amount_detects_overflow() {
        let line = CartLine {
            product_uuid: ProductUuid::new(),
            quantity: 2,
        };

        assert_eq!(total_amount(&[PricedLine { line, price: 100 }]), Some(200));
        assert_eq!(
            total_amount(&[PricedLine {
                line,
                price: u64::MAX
            }]),
            None
        );
        assert_eq!(
            total_amount(&[PricedLine {
                line,
                price: MAX_AMOUNT
            }]),
            None,
            "a total above the signed range cannot be recorded"
        );
        assert_eq!(
            total_amount(&[PricedLine {
                line,
                price: MAX_AMOUNT / 2
            }]),
            Some(MAX_AMOUNT - 1)
        );
    }
}
