//! Current Session Handler

use salvo::prelude::*;

use crate::{envelope::Reply, extensions::*, users::models::AccountPayload};

/// Current Session Handler
///
/// Returns the signed-in account, whatever its role.
#[endpoint(
    tags("sessions"),
    summary = "Current Session",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed-in account"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<AccountPayload>, StatusError> {
    let account = depot.authenticated_or_401()?;

    Ok(Reply::ok(AccountPayload::from(account)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use emporium_app::access::Role;

    use crate::{
        envelope::Envelope,
        test_helpers::{Mocks, account_with_role, make_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("sessions/current").get(handler)
    }

    #[tokio::test]
    async fn test_current_returns_signed_in_account() -> TestResult {
        let account = account_with_role(Role::Admin);
        let uuid = account.uuid.into_uuid();

        let mut res = TestClient::get("http://example.com/sessions/current")
            .send(&make_service(Mocks::default(), Some(account), route()))
            .await;

        let body: Envelope<AccountPayload> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.payload.map(|p| p.id), Some(uuid));

        Ok(())
    }

    #[tokio::test]
    async fn test_current_without_session_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/sessions/current")
            .send(&make_service(Mocks::default(), None, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
