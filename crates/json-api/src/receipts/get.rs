//! Get Receipt Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::Reply,
    extensions::*,
    receipts::{errors::into_status_error, models::ReceiptPayload},
    state::State,
};

/// Get Receipt Handler
///
/// Receipts are visible to their purchaser and to administrators.
#[endpoint(
    tags("receipts"),
    summary = "Get Receipt",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Receipt"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Receipt belongs to another account"),
        (status_code = StatusCode::NOT_FOUND, description = "Receipt not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Reply<ReceiptPayload>, StatusError> {
    let account = depot.authenticated_or_401()?;

    let receipt = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .receipts
        .get_receipt(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if !receipt.visible_to(account) {
        return Err(StatusError::forbidden().brief("This receipt belongs to another account"));
    }

    Ok(Reply::ok(receipt.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use emporium_app::{
        access::Role,
        domain::{accounts::records::AccountRecord, receipts::ReceiptsServiceError},
    };

    use crate::{
        envelope::Envelope,
        test_helpers::{Mocks, account_with_role, make_receipt, make_service},
    };

    use super::*;

    async fn fetch_as(
        account: Option<AccountRecord>,
        purchaser: &'static str,
    ) -> TestResult<(Option<StatusCode>, Envelope<ReceiptPayload>)> {
        let receipt = make_receipt(200, purchaser);
        let uuid = receipt.uuid;

        let mut mocks = Mocks::default();

        mocks
            .receipts
            .expect_get_receipt()
            .withf(move |receipt| *receipt == uuid)
            .return_once(move |_| Ok(receipt));

        let mut res = TestClient::get(format!("http://example.com/receipts/{uuid}"))
            .send(&make_service(
                mocks,
                account,
                Router::with_path("receipts/{id}").get(handler),
            ))
            .await;

        let body = res.take_json().await?;

        Ok((res.status_code, body))
    }

    #[tokio::test]
    async fn test_purchaser_sees_receipt() -> TestResult {
        let (status, body) = fetch_as(Some(account_with_role(Role::User)), "user@example.com").await?;

        assert_eq!(status, Some(StatusCode::OK));
        assert_eq!(body.payload.map(|r| r.amount), Some(200));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_sees_any_receipt() -> TestResult {
        let (status, _) = fetch_as(Some(account_with_role(Role::Admin)), "user@example.com").await?;

        assert_eq!(status, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_other_shopper_gets_403() -> TestResult {
        let (status, body) =
            fetch_as(Some(account_with_role(Role::Premium)), "user@example.com").await?;

        assert_eq!(status, Some(StatusCode::FORBIDDEN));
        assert!(body.payload.is_none(), "receipt must not leak");

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_gets_401() -> TestResult {
        let (status, _) = fetch_as(None, "user@example.com").await?;

        assert_eq!(status, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_receipt_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .receipts
            .expect_get_receipt()
            .once()
            .return_once(|_| Err(ReceiptsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/receipts/{}", Uuid::now_v7()))
            .send(&make_service(
                mocks,
                Some(account_with_role(Role::User)),
                Router::with_path("receipts/{id}").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
