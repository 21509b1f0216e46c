//! List Users Handler

use std::sync::Arc;

use salvo::prelude::*;

use emporium_app::access::ADMINISTRATORS;

use crate::{
    envelope::Reply,
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::AccountPayload},
};

/// List Users Handler
#[endpoint(
    tags("users"),
    summary = "List Users",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Every account"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<AccountPayload>>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    let accounts = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .accounts
        .list_accounts()
        .await
        .map_err(into_status_error)?;

    Ok(Reply::ok(accounts.iter().map(AccountPayload::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use emporium_app::{access::Role, domain::accounts::records::AccountRecord};

    use crate::{
        envelope::Envelope,
        test_helpers::{Mocks, account_with_role, make_service},
    };

    use super::*;

    fn service(mocks: Mocks, account: AccountRecord) -> Service {
        make_service(mocks, Some(account), Router::with_path("users").get(handler))
    }

    #[tokio::test]
    async fn test_list_users_as_admin() -> TestResult {
        let listed = vec![account_with_role(Role::User), account_with_role(Role::Premium)];
        let emails: Vec<String> = listed.iter().map(|a| a.email.clone()).collect();

        let mut mocks = Mocks::default();

        mocks
            .accounts
            .expect_list_accounts()
            .once()
            .return_once(move || Ok(listed));

        let mut res = TestClient::get("http://example.com/users")
            .send(&service(mocks, account_with_role(Role::Admin)))
            .await;

        let body: Envelope<Vec<AccountPayload>> = res.take_json().await?;
        let returned: Vec<String> = body
            .payload
            .unwrap_or_default()
            .into_iter()
            .map(|a| a.email)
            .collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(returned, emails);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_as_shopper_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com/users")
            .send(&service(Mocks::default(), account_with_role(Role::User)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
