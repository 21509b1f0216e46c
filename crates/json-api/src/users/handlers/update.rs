//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::{access::ADMINISTRATORS, domain::accounts::data::AccountUpdate};

use crate::{
    envelope::Reply,
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::AccountPayload, parse_role},
};

/// Update User Request. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u16>,
    /// One of `user`, `premium` or `admin`
    pub role: Option<String>,
}

impl TryFrom<UpdateUserRequest> for AccountUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(AccountUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            role: request.role.as_deref().map(parse_role).transpose()?,
        })
    }
}

/// Update User Handler
#[endpoint(
    tags("users"),
    summary = "Update User",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Account updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown account or invalid data"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Not an administrator"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Reply<AccountPayload>, StatusError> {
    depot.authorize_or_error(ADMINISTRATORS)?;

    let update = AccountUpdate::try_from(json.into_inner())?;

    let account = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .accounts
        .update_account(id.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Reply::ok(AccountPayload::from(&account)))
}
