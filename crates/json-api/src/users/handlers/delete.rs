//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use emporium_app::access::ADMINISTRATORS;

use crate::{
    envelope::{NoPayload, Reply},
    extensions::*,
    state::State,
    users::errors::into_status_error,
};

/// Delete User Handler
///
/// The account's cart is kept.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Account deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown account"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Reply<NoPayload>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .accounts
        .delete_account(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Reply::message("User deleted"))
}
