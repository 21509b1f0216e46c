//! Purchase Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use emporium_app::{
    access::SHOPPERS,
    domain::checkout::{CheckoutError, CheckoutKind},
};

use crate::{
    carts::errors::into_checkout_status_error,
    envelope::Reply,
    extensions::*,
    observability::{CheckoutOutcomeLabel, record_checkout_outcome},
    receipts::models::ReceiptPayload,
    state::State,
};

const NOTHING_AVAILABLE: &str = "No stock was available for the requested products";

/// Purchase Payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasePayload {
    /// Present when at least one product was bought
    pub receipt: Option<ReceiptPayload>,

    /// Products that could not be bought; they remain in the cart
    pub failed_products: Vec<Uuid>,
}

/// Purchase Cart Handler
///
/// Buys every product the inventory can currently supply. Anything else stays
/// in the cart and is listed in `failed_products`. A cart that is not the
/// caller's is answered like a missing one.
#[endpoint(
    tags("carts"),
    summary = "Purchase Cart",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Receipt issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty, missing or foreign cart, or nothing in stock (warning)"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a shopper"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Reply<PurchasePayload>, StatusError> {
    let id = id.into_inner();
    let purchaser = depot.authorize_or_error(SHOPPERS)?;

    if !purchaser.owns_cart(id.into()) {
        record_checkout_outcome(CheckoutOutcomeLabel::Rejected);

        return Err(into_checkout_status_error(CheckoutError::EmptyOrMissingCart));
    }

    let outcome = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .checkout
        .purchase(id.into(), &purchaser.email)
        .await
        .map_err(|error| {
            if matches!(error, CheckoutError::EmptyOrMissingCart) {
                record_checkout_outcome(CheckoutOutcomeLabel::Rejected);
            }

            into_checkout_status_error(error)
        })?;

    let kind = outcome.kind();

    record_checkout_outcome(match kind {
        CheckoutKind::Purchased => CheckoutOutcomeLabel::Purchased,
        CheckoutKind::Partial => CheckoutOutcomeLabel::Partial,
        CheckoutKind::Unfulfilled => CheckoutOutcomeLabel::Unfulfilled,
    });

    info!(
        cart = %id,
        outcome = kind.as_str(),
        failed = outcome.failed_products.len(),
        "purchase attempted"
    );

    let payload = PurchasePayload {
        receipt: outcome.receipt.map(ReceiptPayload::from),
        failed_products: outcome
            .failed_products
            .into_iter()
            .map(Uuid::from)
            .collect(),
    };

    Ok(match kind {
        CheckoutKind::Purchased => Reply::ok(payload).with_message("Purchase complete"),
        CheckoutKind::Partial => {
            Reply::ok(payload).with_message("Some products could not be purchased")
        }
        CheckoutKind::Unfulfilled => {
            Reply::warning(StatusCode::BAD_REQUEST, NOTHING_AVAILABLE, payload)
        }
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use emporium_app::{
        access::Role,
        domain::{
            accounts::records::AccountRecord, checkout::CheckoutOutcome,
            products::records::ProductUuid,
        },
    };

    use crate::{
        envelope::{Envelope, EnvelopeStatus},
        test_helpers::{Mocks, account_with_role, make_receipt, make_service},
    };

    use super::*;

    async fn purchase(
        account: AccountRecord,
        result: Result<CheckoutOutcome, CheckoutError>,
    ) -> TestResult<(Option<StatusCode>, Envelope<PurchasePayload>)> {
        let cart_uuid = account.cart_uuid;
        let email = account.email.clone();

        let mut mocks = Mocks::default();

        mocks
            .checkout
            .expect_purchase()
            .once()
            .withf(move |cart, purchaser| *cart == cart_uuid && purchaser == email)
            .return_once(move |_, _| result);

        let mut res = TestClient::post(format!("http://example.com/carts/{cart_uuid}/purchase"))
            .send(&make_service(
                mocks,
                Some(account),
                Router::with_path("carts/{id}/purchase").post(handler),
            ))
            .await;

        let body = res.take_json().await?;

        Ok((res.status_code, body))
    }

    #[tokio::test]
    async fn test_partial_purchase_returns_receipt_and_failures() -> TestResult {
        let failed = ProductUuid::new();

        let (status, body) = purchase(
            account_with_role(Role::User),
            Ok(CheckoutOutcome {
                receipt: Some(make_receipt(200, "user@example.com")),
                failed_products: vec![failed],
            }),
        )
        .await?;

        let payload = body.payload.ok_or("missing payload")?;

        assert_eq!(status, Some(StatusCode::OK));
        assert_eq!(body.status, EnvelopeStatus::Success);
        assert_eq!(payload.receipt.map(|r| r.amount), Some(200));
        assert_eq!(payload.failed_products, vec![failed.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_in_stock_is_a_warning() -> TestResult {
        let first = ProductUuid::new();
        let second = ProductUuid::new();

        let (status, body) = purchase(
            account_with_role(Role::Premium),
            Ok(CheckoutOutcome {
                receipt: None,
                failed_products: vec![first, second],
            }),
        )
        .await?;

        let payload = body.payload.ok_or("missing payload")?;

        assert_eq!(status, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.status, EnvelopeStatus::Warning);
        assert_eq!(body.message.as_deref(), Some(NOTHING_AVAILABLE));
        assert!(payload.receipt.is_none(), "no receipt without stock");
        assert_eq!(
            payload.failed_products,
            vec![first.into_uuid(), second.into_uuid()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_is_an_error() -> TestResult {
        let (status, body) = purchase(
            account_with_role(Role::User),
            Err(CheckoutError::EmptyOrMissingCart),
        )
        .await?;

        assert_eq!(status, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.status, EnvelopeStatus::Error);

        Ok(())
    }

    #[tokio::test]
    async fn test_purchasing_another_cart_looks_like_a_missing_cart() -> TestResult {
        let mut res = TestClient::post(format!(
            "http://example.com/carts/{}/purchase",
            Uuid::now_v7()
        ))
        .send(&make_service(
            Mocks::default(),
            Some(account_with_role(Role::User)),
            Router::with_path("carts/{id}/purchase").post(handler),
        ))
        .await;

        let body: Envelope<()> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.status, EnvelopeStatus::Error);
        assert_eq!(
            body.message.as_deref(),
            Some("The cart is empty or does not exist")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_administrators_cannot_purchase() -> TestResult {
        let res = TestClient::post(format!(
            "http://example.com/carts/{}/purchase",
            Uuid::now_v7()
        ))
        .send(&make_service(
            Mocks::default(),
            Some(account_with_role(Role::Admin)),
            Router::with_path("carts/{id}/purchase").post(handler),
        ))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
